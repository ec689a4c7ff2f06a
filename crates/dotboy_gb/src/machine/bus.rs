use super::{
    apu::Apu, cartridge::Cartridge, interrupts::Interrupts, joypad::Joypad, ppu::Ppu,
    serial::Serial, timer::Timer, GameBoyConfig,
};

mod boot;
mod dma;
mod init;
mod mmio;
mod traits;

pub(crate) const WRAM_SIZE: usize = 0x2000;
pub(crate) const HRAM_SIZE: usize = 0x7F;

/// Everything the CPU can address, plus the peripherals behind it.
///
/// Peripherals never hold references to each other: the bus owns them and
/// lends the shared [`Interrupts`] bank to each tick.
pub(crate) struct GameBoyBus {
    pub(crate) cartridge: Option<Cartridge>,
    pub(crate) wram: [u8; WRAM_SIZE],
    pub(crate) hram: [u8; HRAM_SIZE],
    pub(crate) interrupts: Interrupts,
    pub(crate) timer: Timer,
    pub(crate) joypad: Joypad,
    pub(crate) serial: Serial,
    pub(crate) ppu: Ppu,
    pub(crate) apu: Apu,
    /// 0x0000..=0x00FF reads the boot image while set. Cleared for good by
    /// the first non-zero write to FF50.
    pub(crate) boot_rom_active: bool,
    /// Last value written to FF46.
    dma_source: u8,
}

impl GameBoyBus {
    pub(crate) fn new(config: &GameBoyConfig) -> Self {
        let mut apu = Apu::new(config.sample_rate, config.audio_queue_capacity);
        apu.render_enabled = config.render_audio;
        let mut ppu = Ppu::new();
        ppu.render_enabled = config.render_graphics;

        let mut bus = Self {
            cartridge: None,
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            interrupts: Interrupts::default(),
            timer: Timer::new(),
            joypad: Joypad::default(),
            serial: Serial::default(),
            ppu,
            apu,
            boot_rom_active: true,
            dma_source: 0xFF,
        };
        bus.randomize_internal_ram(config.wram_seed);
        bus
    }

    /// Advance every clocked peripheral by `cycles` T-cycles.
    pub(crate) fn tick(&mut self, cycles: u32) {
        self.timer.tick(cycles, &mut self.interrupts);
        self.serial.tick(cycles, &mut self.interrupts);
        self.ppu.tick(cycles, &mut self.interrupts);
        self.apu.tick(cycles);
        if let Some(cart) = self.cartridge.as_mut() {
            cart.tick(cycles);
        }
    }

    /// Side-effect-free read of any address, honouring the boot overlay and
    /// PPU contention.
    pub(crate) fn peek(&self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }
}
