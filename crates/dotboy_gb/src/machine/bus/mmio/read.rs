use super::super::{boot::BOOT_ROM, GameBoyBus};

impl GameBoyBus {
    pub(in crate::machine::bus) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom_active => BOOT_ROM[addr as usize],

            // Open bus without a cartridge.
            0x0000..=0x7FFF => self.cartridge.as_ref().map_or(0xFF, |c| c.rom_read(addr)),

            0x8000..=0x9FFF => {
                if self.ppu.vram_accessible() {
                    self.ppu.vram[(addr - 0x8000) as usize]
                } else {
                    0xFF
                }
            }

            0xA000..=0xBFFF => self.cartridge.as_ref().map_or(0xFF, |c| c.ram_read(addr)),

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            // Echo RAM mirrors 0xC000..=0xDDFF.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],

            0xFE00..=0xFE9F => {
                if self.ppu.oam_accessible() {
                    self.ppu.oam[(addr - 0xFE00) as usize]
                } else {
                    0xFF
                }
            }
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.enable,
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.read_sc(),
            0xFF04..=0xFF07 => self.timer.read(addr),
            0xFF0F => self.interrupts.read_if(),
            0xFF10..=0xFF3F => self.apu.read_register(addr),
            0xFF46 => self.dma_source(),
            0xFF40..=0xFF4B => self.ppu.read_register(addr),
            // Unmapped, including FF50 on read.
            _ => 0xFF,
        }
    }
}
