use dotmatrix_core::gb::GameBoy;
use dotmatrix_core::pak::Pak;
use dotmatrix_core::sch;

/// Build a 32 KiB unbanked ROM image with `code` placed at the entry
/// point (0x0100, where PC starts after boot).
pub fn test_rom(code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0147] = 0x00; // no MBC
    rom[0x0148] = 0x00; // 2 banks
    rom[0x0149] = 0x00; // no RAM
    rom[0x0100..0x0100 + code.len()].copy_from_slice(code);
    rom
}

pub fn gb_with(code: &[u8]) -> GameBoy {
    GameBoy::new(Pak::from_bytes(test_rom(code)).expect("test ROM must parse"))
}

/// Execute `steps` instruction steps.
pub fn run_steps(gb: &mut GameBoy, steps: usize) {
    for _ in 0..steps {
        gb.step();
    }
}

/// M-cycles consumed while running `f`, measured against the DIV event's
/// deadline. Only valid for windows shorter than one DIV period.
pub fn cycles_of(gb: &mut GameBoy, f: impl FnOnce(&mut GameBoy)) -> i16 {
    let before = gb.sch.until(sch::DIV);
    f(gb);
    let mut delta = before - gb.sch.until(sch::DIV);
    if delta < 0 {
        delta += sch::CYC_DIV;
    }
    delta
}
