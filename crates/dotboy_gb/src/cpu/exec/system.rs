use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        // STOP carries a padding byte that is skipped.
        let _padding = self.fetch8(bus);
        bus.enter_stop();
        self.stopped = true;
        self.halted = false;
    }

    /// HALT with IME clear and an interrupt already pending does not halt;
    /// instead the following byte is fetched twice.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime && bus.pending_interrupts() != 0 {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the next instruction completes.
        if !self.ime {
            self.ime_enable_pending = true;
        }
    }

    pub(super) fn exec_lock(&mut self, opcode: u8) {
        if !self.locked {
            log::warn!(
                "CPU locked by unassigned opcode 0x{:02X} at PC=0x{:04X}",
                opcode,
                self.regs.pc.wrapping_sub(1)
            );
        }
        self.locked = true;
    }
}
