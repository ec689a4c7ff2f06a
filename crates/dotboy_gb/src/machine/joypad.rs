use dotboy_common::Buttons;

use super::interrupts::{InterruptFlags, Interrupts};

/// P1/JOYP (0xFF00).
///
/// Bits 5 and 4 select the action and direction groups (0 = selected);
/// the low nibble reports the selected buttons active-low.
pub(crate) struct Joypad {
    select: u8,
    pressed: Buttons,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            select: 0x30,
            pressed: Buttons::empty(),
        }
    }
}

impl Joypad {
    /// Low nibble as the CPU sees it: a pressed, selected button reads 0.
    fn lines(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.pressed.direction_nibble();
        }
        if self.select & 0x20 == 0 {
            low &= !self.pressed.action_nibble();
        }
        low & 0x0F
    }

    pub(crate) fn read(&self) -> u8 {
        0xC0 | self.select | self.lines()
    }

    pub(crate) fn write(&mut self, value: u8, interrupts: &mut Interrupts) {
        let before = self.lines();
        self.select = value & 0x30;
        self.raise_on_falling_edge(before, interrupts);
    }

    /// Latch the externally supplied button state. Any selected line that
    /// goes from high to low requests the joypad interrupt.
    pub(crate) fn set_buttons(&mut self, buttons: Buttons, interrupts: &mut Interrupts) {
        let before = self.lines();
        self.pressed = buttons;
        self.raise_on_falling_edge(before, interrupts);
    }

    pub(crate) fn buttons(&self) -> Buttons {
        self.pressed
    }

    fn raise_on_falling_edge(&self, before: u8, interrupts: &mut Interrupts) {
        if before & !self.lines() != 0 {
            interrupts.request(InterruptFlags::JOYPAD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_reads_low_when_action_group_selected() {
        let mut joypad = Joypad::default();
        let mut ints = Interrupts::default();

        joypad.write(0x10, &mut ints);
        assert_eq!(joypad.read(), 0xDF);

        joypad.set_buttons(Buttons::START, &mut ints);
        assert_eq!(joypad.read() & 0x0F, 0x07);
        assert!(ints.flags.contains(InterruptFlags::JOYPAD));
    }

    #[test]
    fn unselected_group_does_not_interrupt() {
        let mut joypad = Joypad::default();
        let mut ints = Interrupts::default();

        joypad.write(0x20, &mut ints);
        joypad.set_buttons(Buttons::A, &mut ints);
        assert_eq!(joypad.read() & 0x0F, 0x0F);
        assert!(ints.flags.is_empty());

        joypad.set_buttons(Buttons::A | Buttons::DOWN, &mut ints);
        assert_eq!(joypad.read() & 0x0F, 0x07);
        assert!(ints.flags.contains(InterruptFlags::JOYPAD));
    }
}
