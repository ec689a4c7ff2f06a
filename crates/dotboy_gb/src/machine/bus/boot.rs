//! Built-in boot image mapped over 0x0000..=0x00FF until FF50 is written.
//!
//! It does not scroll a logo or check the header. It leaves the machine in
//! the documented DMG post-boot state and hands off at 0x0100.

pub(crate) const BOOT_ROM_SIZE: usize = 0x100;

const PROLOGUE: &[u8] = &[
    0x31, 0xFE, 0xFF, // LD SP,FFFE
    0x3E, 0xFC, 0xE0, 0x47, // BGP = FC
    0x3E, 0x80, 0xE0, 0x26, // NR52 = 80
    0x3E, 0x77, 0xE0, 0x24, // NR50 = 77
    0x3E, 0xF3, 0xE0, 0x25, // NR51 = F3
    0x3E, 0x80, 0xE0, 0x11, // NR11 = 80
    0x3E, 0xF3, 0xE0, 0x12, // NR12 = F3
    0x3E, 0xC1, 0xE0, 0x13, // NR13 = C1
    0x3E, 0x87, 0xE0, 0x14, // NR14 = 87, the start-up chime
    0x3E, 0x91, 0xE0, 0x40, // LCDC = 91
    0x01, 0xB0, 0x01, // LD BC,01B0
    0xC5, // PUSH BC
    0xF1, // POP AF
    0x01, 0x13, 0x00, // LD BC,0013
    0x11, 0xD8, 0x00, // LD DE,00D8
    0x21, 0x4D, 0x01, // LD HL,014D
    0xC3, 0xFC, 0x00, // JP 00FC
];

const HANDOFF: [u8; 4] = [
    0x3E, 0x01, // LD A,01
    0xE0, 0x50, // LDH (50),A
];

const fn build() -> [u8; BOOT_ROM_SIZE] {
    let mut image = [0u8; BOOT_ROM_SIZE];
    let mut i = 0;
    while i < PROLOGUE.len() {
        image[i] = PROLOGUE[i];
        i += 1;
    }
    let mut j = 0;
    while j < HANDOFF.len() {
        image[BOOT_ROM_SIZE - HANDOFF.len() + j] = HANDOFF[j];
        j += 1;
    }
    image
}

pub(crate) static BOOT_ROM: [u8; BOOT_ROM_SIZE] = build();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_sits_at_the_end() {
        assert_eq!(&BOOT_ROM[0xFC..], &[0x3E, 0x01, 0xE0, 0x50]);
        assert!(PROLOGUE.len() < 0xFC);
    }
}
