use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = self.regs.rp2(opcode >> 4);
        self.push_u16(bus, value);
    }

    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop_u16(bus);
        self.regs.set_rp2(opcode >> 4, value);
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
    }

    pub(super) fn exec_call_a16<B: Bus>(&mut self, bus: &mut B) {
        self.call_cond(bus, true);
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
    }
}
