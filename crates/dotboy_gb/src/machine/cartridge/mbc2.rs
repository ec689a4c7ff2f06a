use super::banked_rom_byte;

const RAM_NIBBLES: usize = 512;

/// MBC2: 4-bit ROM bank and 512 half-bytes of built-in RAM.
///
/// Address bit 8 in 0x0000..=0x3FFF picks between the RAM enable latch
/// (clear) and the ROM bank register (set).
pub(super) struct Mbc2Cartridge {
    rom: Vec<u8>,
    ram: [u8; RAM_NIBBLES],
    ram_enable: bool,
    rom_bank: u8,
}

impl Mbc2Cartridge {
    pub(super) fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            ram: [0x0F; RAM_NIBBLES],
            ram_enable: false,
            rom_bank: 1,
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.rom_bank as usize };
        banked_rom_byte(&self.rom, bank, addr)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        if addr >= 0x4000 {
            return;
        }
        if addr & 0x0100 == 0 {
            self.ram_enable = value & 0x0F == 0x0A;
        } else {
            self.rom_bank = (value & 0x0F).max(1);
        }
    }

    /// Only the low nibble is stored; the upper four bits read as 1. The
    /// 512-entry RAM repeats across the whole window.
    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        self.ram[addr as usize & (RAM_NIBBLES - 1)] | 0xF0
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if self.ram_enable {
            self.ram[addr as usize & (RAM_NIBBLES - 1)] = value & 0x0F;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_bit_eight_selects_register() {
        let mut rom = vec![0u8; 16 * 0x4000];
        rom[3 * 0x4000] = 0x33;
        let mut c = Mbc2Cartridge::new(rom);

        // Bit 8 clear: RAM enable, not a bank switch.
        c.rom_write(0x0000, 0x03);
        assert_eq!(c.rom_read(0x4000), 0x00);

        c.rom_write(0x0100, 0x03);
        assert_eq!(c.rom_read(0x4000), 0x33);
    }

    #[test]
    fn ram_stores_nibbles_and_mirrors() {
        let mut c = Mbc2Cartridge::new(vec![0u8; 4 * 0x4000]);
        c.rom_write(0x0000, 0x0A);
        c.ram_write(0xA005, 0xAB);
        assert_eq!(c.ram_read(0xA005), 0xFB);
        assert_eq!(c.ram_read(0xA205), 0xFB);
    }
}
