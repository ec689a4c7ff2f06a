use super::banked_ram_index;

/// 32 KiB ROM with no mapper, optionally with up to 8 KiB of RAM that is
/// always enabled.
pub(super) struct RomOnlyCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnlyCartridge {
    pub(super) fn new(rom: Vec<u8>, ram_bytes: usize) -> Self {
        Self {
            rom,
            ram: vec![0xFF; ram_bytes.min(0x2000)],
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        banked_ram_index(&self.ram, 0, addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(i) = banked_ram_index(&self.ram, 0, addr) {
            self.ram[i] = value;
        }
    }
}
