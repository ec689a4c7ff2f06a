use super::{banked_ram_index, banked_rom_byte};

/// MBC1: 5-bit low ROM bank register, a 2-bit register that extends
/// either the ROM bank or selects the RAM bank, and a mode latch.
///
/// In mode 0 the 2-bit register only affects 0x4000..=0x7FFF. In mode 1 it
/// also banks 0x0000..=0x3FFF and selects the RAM bank.
pub(super) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    bank_low5: u8,
    bank_high2: u8,
    advanced_mode: bool,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram_bytes: usize) -> Self {
        Self {
            rom,
            ram: vec![0xFF; ram_bytes],
            ram_enable: false,
            bank_low5: 1,
            bank_high2: 0,
            advanced_mode: false,
        }
    }

    fn rom_bank(&self, addr: u16) -> usize {
        let high = (self.bank_high2 as usize) << 5;
        if addr < 0x4000 {
            if self.advanced_mode {
                high
            } else {
                0
            }
        } else {
            high | self.bank_low5 as usize
        }
    }

    fn ram_bank(&self) -> usize {
        if self.advanced_mode {
            self.bank_high2 as usize
        } else {
            0
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        banked_rom_byte(&self.rom, self.rom_bank(addr), addr)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 in the low register is read as 1.
                self.bank_low5 = (value & 0x1F).max(1);
                log::debug!("MBC1 ROM bank low = {}", self.bank_low5);
            }
            0x4000..=0x5FFF => self.bank_high2 = value & 0x03,
            0x6000..=0x7FFF => self.advanced_mode = value & 0x01 != 0,
            _ => {}
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        banked_ram_index(&self.ram, self.ram_bank(), addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        if let Some(i) = banked_ram_index(&self.ram, self.ram_bank(), addr) {
            self.ram[i] = value;
        }
    }
}
