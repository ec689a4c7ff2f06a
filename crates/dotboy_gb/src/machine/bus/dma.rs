use super::super::ppu::OAM_SIZE;
use super::GameBoyBus;

impl GameBoyBus {
    /// FF46: copy 160 bytes from XX00..=XX9F into OAM in one go. The source
    /// goes through normal read routing, so pages E0..=FF hit echo RAM.
    pub(super) fn start_oam_dma(&mut self, value: u8) {
        self.dma_source = value;
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE {
            let byte = self.read8_mmio(base.wrapping_add(i as u16));
            self.ppu.oam[i] = byte;
        }
    }

    pub(super) fn dma_source(&self) -> u8 {
        self.dma_source
    }
}
