use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let reg = opcode >> 3;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, reg, result);
    }

    pub(super) fn exec_dec8_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let reg = opcode >> 3;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, reg, result);
    }

    pub(super) fn exec_inc16_rr(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x03 | 0x13 | 0x23 | 0x33));
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_add(1);
        self.regs.set_rp(rp, value);
    }

    pub(super) fn exec_dec16_rr(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x0B | 0x1B | 0x2B | 0x3B));
        let rp = opcode >> 4;
        let value = self.regs.rp(rp).wrapping_sub(1);
        self.regs.set_rp(rp, value);
    }
}
