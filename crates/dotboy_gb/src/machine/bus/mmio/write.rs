use super::super::GameBoyBus;

impl GameBoyBus {
    pub(in crate::machine::bus) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            // ROM area writes are mapper control.
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.rom_write(addr, value);
                }
            }

            // Writes are dropped while the PPU owns VRAM (mode 3).
            0x8000..=0x9FFF => {
                if self.ppu.vram_accessible() {
                    self.ppu.vram[(addr - 0x8000) as usize] = value;
                }
            }

            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.ram_write(addr, value);
                }
            }

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,

            // Writes are dropped while the PPU owns OAM (modes 2 and 3).
            0xFE00..=0xFE9F => {
                if self.ppu.oam_accessible() {
                    self.ppu.oam[(addr - 0xFE00) as usize] = value;
                }
            }
            0xFEA0..=0xFEFF => {}

            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.enable = value,
        }
    }

    pub(in crate::machine::bus) fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value, &mut self.interrupts),
            0xFF01 => self.serial.sb = value,
            0xFF02 => self.serial.write_sc(value),
            0xFF04..=0xFF07 => self.timer.write(addr, value),
            0xFF0F => self.interrupts.write_if(value),
            0xFF10..=0xFF3F => self.apu.write_register(addr, value),
            0xFF46 => self.start_oam_dma(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.interrupts),
            0xFF50 => {
                if value != 0 && self.boot_rom_active {
                    log::debug!("boot overlay disabled");
                    self.boot_rom_active = false;
                }
            }
            _ => {}
        }
    }
}
