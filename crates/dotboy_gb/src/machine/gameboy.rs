use dotboy_common::Buttons;

use crate::cpu::{Bus, Cpu};

use super::{CartridgeError, CartridgeHeader, GameBoyBus, GameBoyConfig};
use super::cartridge::Cartridge;

/// One DMG machine: CPU plus everything on its bus.
///
/// Starts at power-on with the built-in boot image mapped at 0x0000. Without
/// a cartridge the ROM area reads as open bus (0xFF), so [`GameBoy::frame`]
/// is always safe to call.
pub struct GameBoy {
    pub(crate) cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: GameBoyConfig,
    total_cycles: u64,
    frame_count: u64,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(GameBoyConfig::default())
    }

    pub fn with_config(config: GameBoyConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(&config),
            config,
            total_cycles: 0,
            frame_count: 0,
        }
    }

    /// Validate `rom` and power-cycle the machine with it inserted.
    ///
    /// On error the machine is left untouched, including any cartridge that
    /// was already loaded.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), CartridgeError> {
        let cartridge = Cartridge::from_rom(rom)?;

        let buttons = self.bus.joypad.buttons();
        self.cpu.reset();
        self.bus = GameBoyBus::new(&self.config);
        self.bus.cartridge = Some(cartridge);
        self.bus.joypad.set_buttons(buttons, &mut self.bus.interrupts);
        self.total_cycles = 0;
        self.frame_count = 0;
        Ok(())
    }

    /// Latch the pressed buttons. A newly pressed, selected button requests
    /// the joypad interrupt.
    pub fn set_input(&mut self, buttons: Buttons) {
        self.bus.joypad.set_buttons(buttons, &mut self.bus.interrupts);
    }

    /// Run until the PPU reaches a frame boundary: V-Blank entry with the
    /// LCD on, or a 70 224-tick period with it off. Cycles of the
    /// instruction that crosses the boundary count towards the next frame.
    pub fn frame(&mut self) {
        loop {
            let cycles = self.cpu.step(&mut self.bus);
            self.bus.tick(cycles);
            self.total_cycles += cycles as u64;
            if self.bus.ppu.take_frame_complete() {
                break;
            }
        }
        self.frame_count += 1;
    }

    /// Copy the frame into `out`. Extra elements on either side are ignored.
    pub fn frame_rgba(&self, out: &mut [u32]) {
        let src = self.bus.ppu.frame_buffer();
        let len = src.len().min(out.len());
        out[..len].copy_from_slice(&src[..len]);
    }

    /// 160 x 144 pixels, row-major, packed as in [`dotboy_common::Color::to_u32`].
    pub fn frame_buffer(&self) -> &[u32] {
        self.bus.ppu.frame_buffer()
    }

    /// Move queued interleaved stereo samples into `out`, whole pairs only.
    /// Returns the number of `i16` values written.
    pub fn drain_audio(&mut self, out: &mut [i16]) -> usize {
        self.bus.apu.drain(out)
    }

    /// Samples waiting in the audio queue.
    pub fn queued_audio(&self) -> usize {
        self.bus.apu.queued()
    }

    /// Store `value` at `addr` exactly as a CPU write would.
    ///
    /// Disabling the boot overlay through FF50 while the CPU is still inside
    /// the boot image completes the hand-off: registers and I/O take their
    /// post-boot values and execution continues at 0x0100.
    pub fn write(&mut self, addr: u16, value: u8) {
        let in_boot = self.bus.boot_rom_active && self.cpu.regs().pc < 0x0100;
        self.bus.write8(addr, value);
        if addr == 0xFF50 && in_boot && !self.bus.boot_rom_active {
            log::debug!("boot hand-off forced by external write");
            self.skip_boot();
        }
    }

    /// Read `addr` without side effects.
    pub fn read(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    pub fn set_render_graphics(&mut self, on: bool) {
        self.config.render_graphics = on;
        self.bus.ppu.render_enabled = on;
    }

    pub fn set_render_audio(&mut self, on: bool) {
        self.config.render_audio = on;
        self.bus.apu.render_enabled = on;
    }

    /// Jump straight to the state the boot image leaves at 0x0100.
    pub fn skip_boot(&mut self) {
        self.cpu.apply_post_boot_state();
        self.bus.apply_post_boot_state();
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.bus.cartridge.as_ref().map(Cartridge::header)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// T-cycles executed since power-on or the last ROM load.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Every byte sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }
}
