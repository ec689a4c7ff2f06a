#![allow(dead_code)]

use dotboy_gb::{CartridgeHeader, GameBoy};

pub const ROM_BANK: usize = 0x4000;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Synthetic cartridge image with code at the 0x0100 entry point.
pub struct RomBuilder {
    rom: Vec<u8>,
}

impl RomBuilder {
    pub fn new(cart_type: u8, banks: usize) -> Self {
        let mut rom = vec![0u8; banks * ROM_BANK];
        rom[0x134..0x13D].copy_from_slice(b"SYNTHETIC");
        rom[0x147] = cart_type;
        rom[0x148] = (banks / 2).trailing_zeros() as u8;
        Self { rom }
    }

    pub fn ram_code(mut self, code: u8) -> Self {
        self.rom[0x149] = code;
        self
    }

    pub fn code(self, program: &[u8]) -> Self {
        self.bytes(0x0100, program)
    }

    pub fn bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.rom[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.rom[0x14D] = CartridgeHeader::compute_header_checksum(&self.rom);
        self.rom
    }
}

/// `JR -2`.
pub const SPIN: [u8; 2] = [0x18, 0xFE];

pub fn boot(rom: &[u8]) -> GameBoy {
    init_logger();
    let mut gb = GameBoy::new();
    gb.load_rom(rom).expect("synthetic ROM loads");
    gb
}
