use bitflags::bitflags;

bitflags! {
    /// Interrupt lines as laid out in IE (0xFFFF) and IF (0xFF0F). Lower
    /// bits have higher priority.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// IE/IF register pair shared by every interrupt source.
///
/// Owned by the bus; peripherals get `&mut Interrupts` during their tick
/// and only ever set bits through [`Interrupts::request`].
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Interrupts {
    pub(crate) enable: u8,
    pub(crate) flags: InterruptFlags,
}

impl Interrupts {
    #[inline]
    pub(crate) fn request(&mut self, line: InterruptFlags) {
        self.flags.insert(line);
    }

    /// IF as the CPU reads it: unused upper bits are 1.
    #[inline]
    pub(crate) fn read_if(&self) -> u8 {
        self.flags.bits() | 0xE0
    }

    #[inline]
    pub(crate) fn write_if(&mut self, value: u8) {
        self.flags = InterruptFlags::from_bits_truncate(value);
    }

    /// Requested and enabled lines, low five bits.
    #[inline]
    pub(crate) fn pending(&self) -> u8 {
        self.enable & self.flags.bits() & 0x1F
    }

    /// Line that would be serviced next, if any.
    pub(crate) fn highest_pending(&self) -> Option<InterruptFlags> {
        let pending = self.pending();
        if pending == 0 {
            None
        } else {
            Some(InterruptFlags::from_bits_truncate(1 << pending.trailing_zeros()))
        }
    }

    #[inline]
    pub(crate) fn acknowledge(&mut self, index: u8) {
        self.flags.remove(InterruptFlags::from_bits_truncate(1 << index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vblank_has_highest_priority() {
        let mut ints = Interrupts {
            enable: 0x1F,
            ..Default::default()
        };
        ints.request(InterruptFlags::JOYPAD);
        ints.request(InterruptFlags::TIMER);
        ints.request(InterruptFlags::VBLANK);
        assert_eq!(ints.highest_pending(), Some(InterruptFlags::VBLANK));

        ints.acknowledge(0);
        assert_eq!(ints.highest_pending(), Some(InterruptFlags::TIMER));
        assert_eq!(ints.read_if(), 0xE0 | 0x14);
    }

    #[test]
    fn disabled_lines_are_not_pending() {
        let mut ints = Interrupts::default();
        ints.write_if(0xFF);
        assert_eq!(ints.flags.bits(), 0x1F);
        assert_eq!(ints.pending(), 0);
        assert_eq!(ints.highest_pending(), None);
    }
}
