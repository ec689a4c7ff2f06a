/// The CPU's view of the machine: a 16-bit address space plus the two hooks
/// the instruction set needs beyond plain loads and stores.
///
/// Implementations must never fail: every address resolves to something,
/// even if that something is open bus (0xFF).
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Interrupt lines that are both requested (IF) and enabled (IE), in the
    /// low five bits.
    ///
    /// The default goes through the memory-mapped registers, which is what a
    /// flat test bus wants.
    fn pending_interrupts(&mut self) -> u8 {
        self.read8(0xFFFF) & self.read8(0xFF0F) & 0x1F
    }

    /// Clear the IF bit for the interrupt at `index` (0 = V-Blank ..
    /// 4 = Joypad) once the CPU has committed to servicing it.
    fn acknowledge_interrupt(&mut self, index: u8) {
        let iflags = self.read8(0xFF0F);
        self.write8(0xFF0F, iflags & !(1 << index));
    }

    /// Called when the CPU executes STOP. Hardware resets the divider here.
    fn enter_stop(&mut self) {}
}
