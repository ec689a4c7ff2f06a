use super::timing::CB_TIMINGS;
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute a CB-prefixed instruction (prefix already consumed) and
    /// return its total cost including the prefix fetch.
    ///
    /// Layout is `xx yyy zzz`: x picks shift/BIT/RES/SET, y the shift kind
    /// or bit index, z the operand.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;

        let value = self.read_reg8(bus, z);
        match x {
            0 => {
                let result = self.alu_shift(y, value);
                self.write_reg8(bus, z, result);
            }
            1 => {
                // BIT: Z from the tested bit, N=0, H=1, C preserved.
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
            }
            2 => self.write_reg8(bus, z, value & !(1 << y)),
            _ => self.write_reg8(bus, z, value | (1 << y)),
        }

        CB_TIMINGS[cb as usize] as u32
    }
}
