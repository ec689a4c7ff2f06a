use lazy_static::lazy_static;

/// Cycle cost of one base opcode.
///
/// `taken` differs from `base` only for conditional JR/JP/CALL/RET.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct OpTiming {
    pub(super) base: u8,
    pub(super) taken: u8,
}

/// T-cycles per unprefixed opcode with the branch not taken. Unassigned
/// opcodes cost one idle M-cycle. 0xCB is a placeholder; CB timings live in
/// `CB_TIMINGS`.
#[rustfmt::skip]
const BASE_CYCLES: [u8; 256] = [
//  x0  x1  x2  x3  x4  x5  x6  x7  x8  x9  xA  xB  xC  xD  xE  xF
     4, 12,  8,  8,  4,  4,  8,  4, 20,  8,  8,  8,  4,  4,  8,  4, // 0x
     4, 12,  8,  8,  4,  4,  8,  4, 12,  8,  8,  8,  4,  4,  8,  4, // 1x
     8, 12,  8,  8,  4,  4,  8,  4,  8,  8,  8,  8,  4,  4,  8,  4, // 2x
     8, 12,  8,  8, 12, 12, 12,  4,  8,  8,  8,  8,  4,  4,  8,  4, // 3x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // 4x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // 5x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // 6x
     8,  8,  8,  8,  8,  8,  4,  8,  4,  4,  4,  4,  4,  4,  8,  4, // 7x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // 8x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // 9x
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // Ax
     4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  4,  4,  4,  8,  4, // Bx
     8, 12, 12, 16, 12, 16,  8, 16,  8, 16, 12,  4, 12, 24,  8, 16, // Cx
     8, 12, 12,  4, 12, 16,  8, 16,  8, 16, 12,  4, 12,  4,  8, 16, // Dx
    12, 12,  8,  4,  4, 16,  8, 16, 16,  4, 16,  4,  4,  4,  8, 16, // Ex
    12, 12,  8,  4,  4, 16,  8, 16, 12,  8, 16,  4,  4,  4,  8, 16, // Fx
];

fn build_base_timings() -> [OpTiming; 256] {
    let mut table = [OpTiming::default(); 256];
    for (opcode, entry) in table.iter_mut().enumerate() {
        let base = BASE_CYCLES[opcode];
        let taken = match opcode {
            // JR cc
            0x20 | 0x28 | 0x30 | 0x38 => 12,
            // RET cc
            0xC0 | 0xC8 | 0xD0 | 0xD8 => 20,
            // JP cc
            0xC2 | 0xCA | 0xD2 | 0xDA => 16,
            // CALL cc
            0xC4 | 0xCC | 0xD4 | 0xDC => 24,
            _ => base,
        };
        *entry = OpTiming { base, taken };
    }
    table
}

/// CB-prefixed opcodes, prefix fetch included: 8 for registers, 12 for
/// BIT b,(HL), 16 for the read-modify-write (HL) forms.
fn build_cb_timings() -> [u8; 256] {
    let mut table = [8u8; 256];
    for (opcode, entry) in table.iter_mut().enumerate() {
        if opcode & 0x07 == 6 {
            *entry = if (0x40..0x80).contains(&opcode) { 12 } else { 16 };
        }
    }
    table
}

lazy_static! {
    pub(super) static ref BASE_TIMINGS: [OpTiming; 256] = build_base_timings();
    pub(super) static ref CB_TIMINGS: [u8; 256] = build_cb_timings();
}
