//! Divider and programmable timer.
//!
//! DIV exposes the upper byte of a 16-bit system counter that advances
//! every T-cycle. TIMA counts falling edges of one counter bit chosen by
//! TAC, ANDed with the enable bit, so register writes that drop that
//! signal also produce an increment.
mod io;

use super::interrupts::{InterruptFlags, Interrupts};

pub(crate) struct Timer {
    /// System counter; DIV is bits 15..8.
    pub(super) counter: u16,
    pub(super) tima: u8,
    pub(super) tma: u8,
    /// TAC low three bits.
    pub(super) tac: u8,
    /// TIMA overflowed during the previous M-cycle; reload from TMA and
    /// raise the interrupt on the next one.
    pub(super) overflow_pending: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            overflow_pending: false,
        }
    }

    /// Divider value at the boot ROM hand-off (DIV reads 0xAB).
    pub(crate) fn apply_post_boot_state(&mut self) {
        *self = Self::new();
        self.counter = 0xABCC;
    }

    /// Counter bit selected by TAC[1:0]: 00 → bit 9 (4096 Hz),
    /// 01 → bit 3 (262144 Hz), 10 → bit 5 (65536 Hz), 11 → bit 7 (16384 Hz).
    #[inline]
    fn selected_bit(tac: u8) -> u16 {
        match tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// The edge-detector input: enable bit AND the selected counter bit.
    #[inline]
    pub(super) fn signal(&self) -> bool {
        self.tac & 0x04 != 0 && self.counter & Self::selected_bit(self.tac) != 0
    }

    #[inline]
    pub(super) fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            // TIMA reads 0x00 for one M-cycle before the reload.
            self.overflow_pending = true;
        }
    }

    /// Advance the timer by one M-cycle (4 T-cycles).
    pub(crate) fn tick_mcycle(&mut self, interrupts: &mut Interrupts) {
        if self.overflow_pending {
            self.overflow_pending = false;
            self.tima = self.tma;
            interrupts.request(InterruptFlags::TIMER);
        }

        let before = self.signal();
        self.counter = self.counter.wrapping_add(4);
        if before && !self.signal() {
            self.increment_tima();
        }
    }

    /// Advance by `cycles` T-cycles. Callers always pass multiples of 4.
    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut Interrupts) {
        for _ in 0..cycles / 4 {
            self.tick_mcycle(interrupts);
        }
    }

    #[inline]
    pub(crate) fn div(&self) -> u8 {
        (self.counter >> 8) as u8
    }
}
