mod error;
mod header;
mod mbc1;
mod mbc2;
mod mbc3;
mod mbc5;
mod rom_only;

pub use error::CartridgeError;
pub use header::{CartridgeHeader, MapperKind};

use mbc1::Mbc1Cartridge;
use mbc2::Mbc2Cartridge;
use mbc3::Mbc3Cartridge;
use mbc5::Mbc5Cartridge;
use rom_only::RomOnlyCartridge;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// Loaded cartridge: parsed header plus the mapper that owns ROM and RAM.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    mapper: Mapper,
}

enum Mapper {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc2(Mbc2Cartridge),
    Mbc3(Mbc3Cartridge),
    Mbc5(Mbc5Cartridge),
}

impl Cartridge {
    /// Validate the header and build the mapper it declares.
    ///
    /// A header checksum mismatch is only logged; real boot ROMs would lock
    /// up, but homebrew and test images often leave the byte at zero.
    pub(crate) fn from_rom(rom: &[u8]) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(rom)?;

        let computed = CartridgeHeader::compute_header_checksum(rom);
        if computed != header.header_checksum {
            log::warn!(
                "header checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
                header.header_checksum,
                computed
            );
        }

        let image = rom[..header.rom_banks * ROM_BANK_SIZE].to_vec();
        let mapper = match header.mapper {
            MapperKind::RomOnly => Mapper::RomOnly(RomOnlyCartridge::new(image, header.ram_bytes)),
            MapperKind::Mbc1 => Mapper::Mbc1(Mbc1Cartridge::new(image, header.ram_bytes)),
            MapperKind::Mbc2 => Mapper::Mbc2(Mbc2Cartridge::new(image)),
            MapperKind::Mbc3 => Mapper::Mbc3(Mbc3Cartridge::new(image, header.ram_bytes)),
            MapperKind::Mbc5 => Mapper::Mbc5(Mbc5Cartridge::new(image, header.ram_bytes)),
        };

        log::info!(
            "loaded cartridge \"{}\": type 0x{:02X} ({:?}), {} ROM banks, {} bytes RAM",
            header.title,
            header.cartridge_type,
            header.mapper,
            header.rom_banks,
            header.ram_bytes
        );

        Ok(Self { header, mapper })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.rom_read(addr),
            Mapper::Mbc1(m) => m.rom_read(addr),
            Mapper::Mbc2(m) => m.rom_read(addr),
            Mapper::Mbc3(m) => m.rom_read(addr),
            Mapper::Mbc5(m) => m.rom_read(addr),
        }
    }

    /// Writes into 0x0000..=0x7FFF drive the mapper's control registers.
    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(_) => {}
            Mapper::Mbc1(m) => m.rom_write(addr, value),
            Mapper::Mbc2(m) => m.rom_write(addr, value),
            Mapper::Mbc3(m) => m.rom_write(addr, value),
            Mapper::Mbc5(m) => m.rom_write(addr, value),
        }
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.ram_read(addr),
            Mapper::Mbc1(m) => m.ram_read(addr),
            Mapper::Mbc2(m) => m.ram_read(addr),
            Mapper::Mbc3(m) => m.ram_read(addr),
            Mapper::Mbc5(m) => m.ram_read(addr),
        }
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(m) => m.ram_write(addr, value),
            Mapper::Mbc1(m) => m.ram_write(addr, value),
            Mapper::Mbc2(m) => m.ram_write(addr, value),
            Mapper::Mbc3(m) => m.ram_write(addr, value),
            Mapper::Mbc5(m) => m.ram_write(addr, value),
        }
    }

    /// Advance cartridge-side clocks (the MBC3 RTC) by `cycles` T-cycles.
    pub(crate) fn tick(&mut self, cycles: u32) {
        if let Mapper::Mbc3(m) = &mut self.mapper {
            m.tick(cycles);
        }
    }
}

/// Byte at `addr` (window-relative) of ROM bank `bank`, wrapping the bank
/// number to the image size.
#[inline]
fn banked_rom_byte(rom: &[u8], bank: usize, addr: u16) -> u8 {
    let banks = (rom.len() / ROM_BANK_SIZE).max(1);
    let index = (bank % banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
    rom.get(index).copied().unwrap_or(0xFF)
}

/// Index into external RAM for `addr` in 0xA000..=0xBFFF and RAM bank
/// `bank`. Small RAMs (2 KiB) mirror across the window.
#[inline]
fn banked_ram_index(ram: &[u8], bank: usize, addr: u16) -> Option<usize> {
    if ram.is_empty() {
        return None;
    }
    let offset = (addr as usize).wrapping_sub(0xA000) & (RAM_BANK_SIZE - 1);
    Some((bank * RAM_BANK_SIZE + offset) % ram.len())
}
