//! Cartridge header decoding (0x0100..0x0150).

use log::warn;

use super::{Mbc, PakError};

pub const HEADER_END: usize = 0x0150;

const LOGO_START: usize = 0x0104;
const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0144;
const CGB_FLAG: usize = 0x0143;
const PAK_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;

/// The 48-byte compressed logo the boot ROM compares against.
const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00,
    0x0D, 0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD,
    0xD9, 0x99, 0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB,
    0xB9, 0x33, 0x3E,
];

/// RAM bank counts by ram_size code.
const RAM_BANKS: [u8; 6] = [0, 0, 1, 4, 16, 8];

#[derive(Debug)]
pub struct Header {
    pub title: String,
    pub cgb_flag: u8,
    pub pak_type: u8,
    pub mbc: Mbc,
    pub battery: bool,
    pub rom_banks: u16,
    pub ram_banks: u8,
    pub logo_mismatches: u32,
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Header, PakError> {
        if rom.len() < HEADER_END {
            return Err(PakError::TooSmall(rom.len()));
        }

        let pak_type = rom[PAK_TYPE];
        let (mbc, battery) = decode_pak_type(pak_type).ok_or(PakError::UnknownMbc(pak_type))?;

        let rom_code = rom[ROM_SIZE];
        if rom_code > 8 {
            return Err(PakError::BadRomSize(rom_code));
        }
        let rom_banks = 2u16 << rom_code;

        let ram_code = rom[RAM_SIZE];
        let ram_banks = *RAM_BANKS
            .get(ram_code as usize)
            .ok_or(PakError::BadRamSize(ram_code))?;

        let title = rom[TITLE_START..TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect();

        let logo_mismatches = rom[LOGO_START..LOGO_START + NINTENDO_LOGO.len()]
            .iter()
            .zip(NINTENDO_LOGO.iter())
            .filter(|(a, b)| a != b)
            .count() as u32;
        if logo_mismatches != 0 {
            warn!("logo check failed: {logo_mismatches} byte(s) differ");
        }

        Ok(Header {
            title,
            cgb_flag: rom[CGB_FLAG],
            pak_type,
            mbc,
            battery,
            rom_banks,
            ram_banks,
            logo_mismatches,
        })
    }
}

/// pak_type byte → controller + battery flag.
fn decode_pak_type(code: u8) -> Option<(Mbc, bool)> {
    Some(match code {
        0x00 => (Mbc::None, false),
        0x01 | 0x02 => (Mbc::Mbc1, false),
        0x03 => (Mbc::Mbc1, true),
        0x05 => (Mbc::Mbc2, false),
        0x06 => (Mbc::Mbc2, true),
        0x08 => (Mbc::None, false),
        0x09 => (Mbc::None, true),
        0x0B | 0x0C => (Mbc::Mmm01, false),
        0x0D => (Mbc::Mmm01, true),
        0x0F | 0x10 => (Mbc::Mbc3, true),
        0x11 | 0x12 => (Mbc::Mbc3, false),
        0x13 => (Mbc::Mbc3, true),
        0x19 | 0x1A => (Mbc::Mbc5, false),
        0x1B => (Mbc::Mbc5, true),
        0x1C | 0x1D => (Mbc::Mbc5, false), // rumble motor not modeled
        0x1E => (Mbc::Mbc5, true),
        0x20 => (Mbc::Mbc6, false),
        0x22 => (Mbc::Mbc7, true),
        0xFC => (Mbc::PocketCam, false),
        0xFD => (Mbc::Tama5, false),
        0xFE => (Mbc::HuC3, false),
        0xFF => (Mbc::HuC1, true),
        _ => return None,
    })
}
