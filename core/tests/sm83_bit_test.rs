mod common;
use common::{cycles_of, gb_with};

#[test]
fn test_rlca() {
    // RLCA (0x07): bit 7 wraps to bit 0 and carry; Z always clear.
    let mut gb = gb_with(&[0x07]);
    gb.cpu.a = 0x85;
    gb.step();
    assert_eq!(gb.cpu.a, 0x0B);
    assert!(gb.cpu.cf);
    assert!(!gb.cpu.zf && !gb.cpu.nf && !gb.cpu.hf);
}

#[test]
fn test_rla_shifts_through_carry() {
    // RLA (0x17): old carry enters bit 0.
    let mut gb = gb_with(&[0x17]);
    gb.cpu.a = 0x80;
    gb.cpu.cf = false;
    gb.step();
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.cf);
    assert!(!gb.cpu.zf); // Z stays clear even on a zero result
}

#[test]
fn test_rra() {
    let mut gb = gb_with(&[0x1F]);
    gb.cpu.a = 0x01;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x80);
    assert!(gb.cpu.cf);
}

#[test]
fn test_rrca() {
    let mut gb = gb_with(&[0x0F]);
    gb.cpu.a = 0x01;
    gb.step();
    assert_eq!(gb.cpu.a, 0x80);
    assert!(gb.cpu.cf);
}

#[test]
fn test_cb_rlc_sets_zero() {
    // CB RLC B on zero: the CB variants do set Z.
    let mut gb = gb_with(&[0xCB, 0x00]);
    gb.cpu.b = 0x00;
    let cycles = cycles_of(&mut gb, |gb| {
        gb.step();
    });
    assert_eq!(cycles, 2);
    assert!(gb.cpu.zf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_cb_rl_through_carry() {
    // CB RL C (0xCB 0x11)
    let mut gb = gb_with(&[0xCB, 0x11]);
    gb.cpu.c = 0x80;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.c, 0x01);
    assert!(gb.cpu.cf);
    assert!(!gb.cpu.zf);
}

#[test]
fn test_cb_sla() {
    // SLA A (0xCB 0x27)
    let mut gb = gb_with(&[0xCB, 0x27]);
    gb.cpu.a = 0xC1;
    gb.step();
    assert_eq!(gb.cpu.a, 0x82);
    assert!(gb.cpu.cf);
}

#[test]
fn test_cb_sra_preserves_sign() {
    // SRA D (0xCB 0x2A): arithmetic shift keeps bit 7.
    let mut gb = gb_with(&[0xCB, 0x2A]);
    gb.cpu.d = 0x81;
    gb.step();
    assert_eq!(gb.cpu.d, 0xC0);
    assert!(gb.cpu.cf);
}

#[test]
fn test_cb_srl_clears_sign() {
    // SRL A (0xCB 0x3F)
    let mut gb = gb_with(&[0xCB, 0x3F]);
    gb.cpu.a = 0x81;
    gb.step();
    assert_eq!(gb.cpu.a, 0x40);
    assert!(gb.cpu.cf);
}

#[test]
fn test_cb_swap() {
    // SWAP E (0xCB 0x33): nibbles exchange, only Z can set.
    let mut gb = gb_with(&[0xCB, 0x33]);
    gb.cpu.e = 0xF1;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.e, 0x1F);
    assert!(!gb.cpu.zf && !gb.cpu.nf && !gb.cpu.hf && !gb.cpu.cf);
}

#[test]
fn test_cb_bit_test() {
    // BIT 7,H (0xCB 0x7C): Z reflects the complement of the bit, C is
    // untouched.
    let mut gb = gb_with(&[0xCB, 0x7C, 0xCB, 0x7C]);
    gb.cpu.h = 0x80;
    gb.cpu.cf = true;
    gb.step();
    assert!(!gb.cpu.zf);
    assert!(!gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(gb.cpu.cf);

    gb.cpu.h = 0x00;
    gb.step();
    assert!(gb.cpu.zf);
}

#[test]
fn test_cb_res_set_no_flags() {
    // RES 3,B then SET 3,B round-trips the bit without touching flags.
    let mut gb = gb_with(&[0xCB, 0x98, 0xCB, 0xD8]);
    gb.cpu.b = 0xFF;
    gb.cpu.zf = true;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.b, 0xF7);
    gb.step();
    assert_eq!(gb.cpu.b, 0xFF);
    assert!(gb.cpu.zf && gb.cpu.cf);
}

#[test]
fn test_cb_hl_read_modify_write() {
    // SET 0,(HL) (0xCB 0xC6): 4 cycles, memory round-trip.
    let mut gb = gb_with(&[0xCB, 0xC6]);
    gb.cpu.set_hl(0xC050);
    gb.mem.write(&mut gb.sch, 0xC050, 0x00);
    let cycles = cycles_of(&mut gb, |gb| {
        gb.step();
    });
    assert_eq!(cycles, 4);
    assert_eq!(gb.mem.read(0xC050), 0x01);
}

#[test]
fn test_cb_bit_hl_costs_three() {
    // BIT 0,(HL) (0xCB 0x46): read-only, 3 cycles.
    let mut gb = gb_with(&[0xCB, 0x46]);
    gb.cpu.set_hl(0xC050);
    let cycles = cycles_of(&mut gb, |gb| {
        gb.step();
    });
    assert_eq!(cycles, 3);
    assert!(gb.cpu.zf);
}
