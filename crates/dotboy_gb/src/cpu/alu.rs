use super::{Cpu, Flag};

impl Cpu {
    /// ADD/ADC on A. `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);
    }

    /// SUB/SBC on A. `use_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// CP: flags as for SUB, A untouched.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
        self.set_flag(Flag::H, true);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.clear_flags();
        self.set_flag(Flag::Z, self.regs.a == 0);
    }

    /// Run one of the eight accumulator operations selected by opcode bits
    /// 3-5 (ADD ADC SUB SBC AND XOR OR CP).
    pub(super) fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// Decimal adjust after a BCD add or subtract. N is preserved.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// ADD HL,rr. Z is untouched; H and C come from bits 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, hl as u32 + value as u32 > 0xFFFF);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// SP plus signed immediate, shared by ADD SP,e8 and LD HL,SP+e8.
    /// Z and N clear; H and C come from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// The shift/rotate family shared by the CB table (ops 0-7) and the
    /// accumulator rotates. Sets Z from the result, clears N and H, and
    /// puts the shifted-out bit in C.
    pub(super) fn alu_shift(&mut self, op: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match op & 0x07 {
            // RLC
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            // RR
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            // SLA
            4 => (value << 1, value & 0x80 != 0),
            // SRA
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            // SWAP
            6 => (value.rotate_left(4), false),
            // SRL
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry_out);
        result
    }
}
