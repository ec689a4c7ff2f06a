/// Register file of the LR35902.
///
/// Eight 8-bit registers that pair up as AF/BC/DE/HL, plus SP and PC.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// Flag bits in the F register.
///
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 always read as zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Registers {
    /// Register contents the DMG boot ROM leaves behind when it jumps to the
    /// cartridge entry point at 0x0100.
    pub const fn post_boot() -> Self {
        Self {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    /// 16-bit pair by the `rp` encoding used in opcode bits 4-5
    /// (0=BC, 1=DE, 2=HL, 3=SP).
    #[inline]
    pub(crate) fn rp(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    #[inline]
    pub(crate) fn set_rp(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.set_bc(value),
            1 => self.set_de(value),
            2 => self.set_hl(value),
            _ => self.sp = value,
        }
    }

    /// 16-bit pair by the `rp2` encoding used by PUSH/POP
    /// (0=BC, 1=DE, 2=HL, 3=AF).
    #[inline]
    pub(crate) fn rp2(&self, index: u8) -> u16 {
        match index & 0x03 {
            3 => self.af(),
            other => self.rp(other),
        }
    }

    #[inline]
    pub(crate) fn set_rp2(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            3 => self.set_af(value),
            other => self.set_rp(other, value),
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        (self.f & (1 << flag as u8)) != 0
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        if value {
            self.f |= mask;
        } else {
            self.f &= !mask;
        }
    }
}
