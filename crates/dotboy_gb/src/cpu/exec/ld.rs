use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch16(bus);
        self.regs.set_rp(opcode >> 4, value);
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch8(bus);
        self.write_reg8(bus, opcode >> 3, value);
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = 0xFF00 | self.regs.c as u16;
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
    }

    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms, applying the HL
    /// post-increment or post-decrement.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.indirect_addr(opcode);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.indirect_addr(opcode);
        self.regs.a = bus.read8(addr);
    }

    pub(super) fn exec_ld_rr_or_halt<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!((0x40..=0x7F).contains(&opcode));
        if opcode == 0x76 {
            self.exec_halt(bus);
            return;
        }

        let value = self.read_reg8(bus, opcode & 0x07);
        self.write_reg8(bus, opcode >> 3, value);
    }

    pub(super) fn exec_ld_sp_hl(&mut self) {
        self.regs.sp = self.regs.hl();
    }
}
