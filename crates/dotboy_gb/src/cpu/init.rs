use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-on state: every register zero, PC at the start of the boot
    /// image.
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            locked: false,
            branch_taken: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register state the DMG boot ROM leaves behind when it hands control
    /// to the cartridge at 0x0100. IME is clear.
    pub fn apply_post_boot_state(&mut self) {
        *self = Self::new();
        self.regs = Registers::post_boot();
    }
}
