use bitflags::bitflags;

bitflags! {
    /// Button state pushed by the caller before each frame.
    ///
    /// A set bit means "pressed". The layout is the one used across the C
    /// ABI, so it must stay stable.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Buttons: u8 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const RIGHT = 1 << 4;
        const LEFT = 1 << 5;
        const UP = 1 << 6;
        const DOWN = 1 << 7;
    }
}

impl Buttons {
    /// Action buttons as the active-high nibble used by P1 bits 0-3
    /// (A, B, Select, Start).
    #[inline]
    pub fn action_nibble(self) -> u8 {
        self.bits() & 0x0F
    }

    /// Direction buttons as the active-high nibble used by P1 bits 0-3
    /// (Right, Left, Up, Down).
    #[inline]
    pub fn direction_nibble(self) -> u8 {
        self.bits() >> 4
    }
}
