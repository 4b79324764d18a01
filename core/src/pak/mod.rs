//! Cartridge ("pak"): owns the ROM and external RAM bytes and the bank
//! state the MBC mutates. The memory map borrows banks out of it through
//! the remap helpers on [`crate::mem::Memory`].

pub mod header;
pub(crate) mod mbc;

use std::fmt;
use std::io;
use std::path::Path;

use log::info;

use crate::mem::{RAM_BANK_SIZE, ROM_BANK_SIZE};
pub use header::Header;

/// Memory bank controller families, as encoded in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mbc {
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Mbc6,
    Mbc7,
    Mmm01,
    HuC1,
    HuC3,
    PocketCam,
    Tama5,
}

impl Mbc {
    /// Controllers the write handlers actually implement; the rest are
    /// decoded for diagnostics but rejected at load.
    pub fn supported(self) -> bool {
        matches!(
            self,
            Mbc::None | Mbc::Mbc1 | Mbc::Mbc2 | Mbc::Mbc3 | Mbc::Mbc5
        )
    }
}

#[derive(Debug)]
pub enum PakError {
    /// Underlying I/O error (file not found, permission denied, ...).
    Io(io::Error),
    /// ROM image smaller than a cartridge header.
    TooSmall(usize),
    /// pak_type byte not in the controller table.
    UnknownMbc(u8),
    /// Controller decoded but not implemented.
    UnsupportedMbc(Mbc),
    /// rom_size code outside 0..=8.
    BadRomSize(u8),
    /// ram_size code outside the size table.
    BadRamSize(u8),
}

impl fmt::Display for PakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PakError::Io(e) => write!(f, "I/O error: {e}"),
            PakError::TooSmall(len) => {
                write!(f, "ROM image of {len} bytes is smaller than a header")
            }
            PakError::UnknownMbc(code) => write!(f, "unknown pak type {code:#04x}"),
            PakError::UnsupportedMbc(mbc) => write!(f, "unsupported controller {mbc:?}"),
            PakError::BadRomSize(code) => write!(f, "impossible ROM size code {code:#04x}"),
            PakError::BadRamSize(code) => write!(f, "impossible RAM size code {code:#04x}"),
        }
    }
}

impl std::error::Error for PakError {}

impl From<io::Error> for PakError {
    fn from(e: io::Error) -> Self {
        PakError::Io(e)
    }
}

/// MBC2's built-in RAM: 512 half-bytes.
const MBC2_RAM_SIZE: usize = 0x200;

pub struct Pak {
    rom: Vec<u8>,
    ram: Vec<u8>,
    mbc: Mbc,
    battery: bool,
    title: String,
    rom_banks: u16,
    ram_banks: u8,

    // Live bank state, mutated by the MBC write handlers.
    rom_bank_curr: u16,
    ram_bank_curr: u8,
    ram_enabled: bool,
    dirty_ram: bool,
    // Raw MBC register latches (meaning varies by controller).
    pub(crate) bank_lo: u8,
    pub(crate) bank_hi: u8,
    pub(crate) bank_mode: u8,
}

impl Pak {
    /// Build a pak from a raw ROM image. The image is padded with 0xFF up
    /// to the bank count the header declares.
    pub fn from_bytes(mut rom: Vec<u8>) -> Result<Pak, PakError> {
        let header = Header::parse(&rom)?;
        if !header.mbc.supported() {
            return Err(PakError::UnsupportedMbc(header.mbc));
        }

        let rom_size = header.rom_banks as usize * ROM_BANK_SIZE;
        if rom.len() < rom_size {
            rom.resize(rom_size, 0xFF);
        }
        let ram_size = match header.mbc {
            Mbc::Mbc2 => MBC2_RAM_SIZE,
            _ => header.ram_banks as usize * RAM_BANK_SIZE,
        };

        info!(
            "pak: \"{}\" {:?} rom_banks={} ram_banks={} battery={}",
            header.title, header.mbc, header.rom_banks, header.ram_banks, header.battery
        );

        let mut pak = Pak {
            rom,
            ram: vec![0; ram_size],
            mbc: header.mbc,
            battery: header.battery,
            title: header.title,
            rom_banks: header.rom_banks,
            ram_banks: match header.mbc {
                Mbc::Mbc2 => 1,
                _ => header.ram_banks,
            },
            rom_bank_curr: 1,
            ram_bank_curr: 0,
            ram_enabled: false,
            dirty_ram: false,
            bank_lo: 1,
            bank_hi: 0,
            bank_mode: 0,
        };
        pak.reset_banks();
        Ok(pak)
    }

    /// Read and decode a ROM file.
    pub fn load(path: &Path) -> Result<Pak, PakError> {
        let rom = std::fs::read(path)?;
        Pak::from_bytes(rom)
    }

    /// Restore power-on bank state.
    pub(crate) fn reset_banks(&mut self) {
        self.rom_bank_curr = 1;
        self.ram_bank_curr = 0;
        self.bank_lo = 1;
        self.bank_hi = 0;
        self.bank_mode = 0;
        // Unbanked carts have no enable register; their RAM is always
        // reachable.
        self.ram_enabled = self.mbc == Mbc::None && self.ram_banks > 0;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mbc(&self) -> Mbc {
        self.mbc
    }

    pub fn battery(&self) -> bool {
        self.battery
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    pub fn rom_banks(&self) -> u16 {
        self.rom_banks
    }

    pub fn ram_banks(&self) -> u8 {
        self.ram_banks
    }

    pub fn has_ram(&self) -> bool {
        self.ram_banks > 0
    }

    pub fn rom_bank_curr(&self) -> u16 {
        self.rom_bank_curr
    }

    pub fn ram_bank_curr(&self) -> u8 {
        self.ram_bank_curr
    }

    pub(crate) fn set_rom_bank_curr(&mut self, bank: usize) {
        self.rom_bank_curr = bank as u16;
    }

    pub(crate) fn set_ram_bank_curr(&mut self, bank: usize) {
        self.ram_bank_curr = bank as u8;
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub(crate) fn set_ram_enabled(&mut self, on: bool) {
        self.ram_enabled = on;
    }

    /// Byte offset of a ROM bank, wrapped to the banks that exist
    /// (bank counts are powers of two, mirroring the ignored address
    /// lines of a smaller ROM).
    pub(crate) fn rom_bank_offset(&self, bank: u16) -> usize {
        (bank & (self.rom_banks - 1)) as usize * ROM_BANK_SIZE
    }

    pub(crate) fn ram_bank_offset(&self, bank: u8) -> usize {
        if self.ram_banks == 0 {
            return 0;
        }
        (bank % self.ram_banks) as usize * RAM_BANK_SIZE % self.ram.len().max(1)
    }

    pub(crate) fn write_ram(&mut self, offset: usize, val: u8) {
        self.ram[offset] = val;
        if self.battery {
            self.dirty_ram = true;
        }
    }

    /// True when battery-backed RAM has been modified since load.
    pub fn dirty_ram(&self) -> bool {
        self.dirty_ram
    }

    /// Install previously-saved external RAM.
    pub fn load_ram(&mut self, data: &[u8]) {
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
        self.dirty_ram = false;
    }
}
