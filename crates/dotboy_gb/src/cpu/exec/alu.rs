use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let value = self.read_reg8(bus, opcode & 0x07);
        self.alu_dispatch(opcode >> 3, value);
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch8(bus);
        self.alu_dispatch(opcode >> 3, value);
    }

    /// RLCA / RRCA / RLA / RRA: the CB rotates on A, except Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let result = self.alu_shift(opcode >> 3, self.regs.a);
        self.regs.a = result;
        self.set_flag(Flag::Z, false);
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.regs.rp(opcode >> 4);
        self.alu_add16_hl(value);
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }
}
