use super::interrupts::{InterruptFlags, Interrupts};

/// T-cycles per bit at the internal 8192 Hz serial clock.
const CYCLES_PER_BIT: u32 = 512;

/// SB/SC with no link partner attached.
///
/// An internally clocked transfer shifts `SB` out over eight bit-times and
/// shifts in `0xFF` (an idle line), then clears SC bit 7 and requests the
/// serial interrupt. Every byte sent is appended to `output`, which test
/// ROMs use as a console.
pub(crate) struct Serial {
    pub(crate) sb: u8,
    sc: u8,
    /// T-cycles left in the current transfer, 0 when idle.
    remaining: u32,
    pub(crate) output: Vec<u8>,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            sb: 0x00,
            sc: 0x7E,
            remaining: 0,
            output: Vec::new(),
        }
    }
}

impl Serial {
    pub(crate) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(crate) fn write_sc(&mut self, value: u8) {
        self.sc = value & 0x81;
        if self.sc == 0x81 {
            self.output.push(self.sb);
            self.remaining = CYCLES_PER_BIT * 8;
        } else if self.sc & 0x80 == 0 {
            self.remaining = 0;
        }
        // External clock with no partner: the transfer never completes.
    }

    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut Interrupts) {
        if self.remaining == 0 {
            return;
        }
        self.remaining = self.remaining.saturating_sub(cycles);
        if self.remaining == 0 {
            self.sb = 0xFF;
            self.sc &= !0x80;
            interrupts.request(InterruptFlags::SERIAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_transfer_completes_after_eight_bits() {
        let mut serial = Serial::default();
        let mut ints = Interrupts::default();
        serial.sb = b'A';
        serial.write_sc(0x81);
        assert_eq!(serial.output, b"A");

        serial.tick(4092, &mut ints);
        assert_eq!(serial.read_sc() & 0x80, 0x80);
        serial.tick(4, &mut ints);
        assert_eq!(serial.read_sc() & 0x80, 0x00);
        assert_eq!(serial.sb, 0xFF);
        assert!(ints.flags.contains(InterruptFlags::SERIAL));
    }

    #[test]
    fn external_clock_never_completes() {
        let mut serial = Serial::default();
        let mut ints = Interrupts::default();
        serial.write_sc(0x80);
        serial.tick(100_000, &mut ints);
        assert!(ints.flags.is_empty());
        assert!(serial.output.is_empty());
    }
}
