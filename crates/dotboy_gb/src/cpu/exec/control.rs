use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        self.jr(bus, self.condition(opcode));
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        self.jp_cond(bus, self.condition(opcode));
    }

    pub(super) fn exec_jp_a16<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.fetch16(bus);
    }

    pub(super) fn exec_jp_hl(&mut self) {
        self.regs.pc = self.regs.hl();
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        self.call_cond(bus, self.condition(opcode));
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        self.ret_cond(bus, self.condition(opcode));
    }
}
