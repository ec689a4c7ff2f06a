use super::{Bus, Cpu};

/// T-cycles charged for an interrupt dispatch.
const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Apply delayed IME change requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }

    /// Whether an interrupt should be dispatched now. A halted CPU with IME
    /// clear wakes up here without servicing anything.
    fn should_dispatch<B: Bus>(&mut self, bus: &mut B) -> bool {
        if bus.pending_interrupts() == 0 {
            return false;
        }
        if !self.ime {
            self.halted = false;
            return false;
        }
        true
    }

    /// Service the highest-priority pending interrupt, if IME allows it.
    ///
    /// Returns `Some(cycles)` when an interrupt was dispatched.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.should_dispatch(bus) {
            return None;
        }

        self.ime = false;
        self.halted = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;

        let [hi, lo] = self.regs.pc.to_be_bytes();

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);

        // The line is picked after the high byte lands, so a push into IE
        // can cancel the dispatch.
        let pending = bus.pending_interrupts();

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        if pending == 0 {
            log::debug!("interrupt dispatch cancelled, jumping to 0x0000");
            self.regs.pc = 0x0000;
        } else {
            // V-Blank > STAT > Timer > Serial > Joypad.
            let index = pending.trailing_zeros() as u8;
            bus.acknowledge_interrupt(index);
            self.regs.pc = 0x0040 + index as u16 * 8;
        }

        Some(DISPATCH_CYCLES)
    }
}
