use super::Timer;

impl Timer {
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => self.div(),
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => self.write_div(),
            0xFF05 => self.write_tima(value),
            0xFF06 => self.write_tma(value),
            0xFF07 => self.write_tac(value),
            _ => {}
        }
    }

    /// Any write clears the whole counter. If the selected bit was high the
    /// edge detector sees a falling edge.
    pub(crate) fn write_div(&mut self) {
        let before = self.signal();
        self.counter = 0;
        if before {
            self.increment_tima();
        }
    }

    /// Writing TIMA while a reload is pending cancels the reload and its
    /// interrupt.
    pub(super) fn write_tima(&mut self, value: u8) {
        self.overflow_pending = false;
        self.tima = value;
    }

    pub(super) fn write_tma(&mut self, value: u8) {
        self.tma = value;
    }

    /// Disabling the timer or switching to a bit that is low while the old
    /// one was high counts as a falling edge.
    pub(super) fn write_tac(&mut self, value: u8) {
        let before = self.signal();
        self.tac = value & 0x07;
        if before && !self.signal() {
            self.increment_tima();
        }
    }
}
