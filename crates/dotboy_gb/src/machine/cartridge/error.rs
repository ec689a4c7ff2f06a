/// Reasons a ROM image is rejected by [`crate::GameBoy::load_rom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeError {
    /// The image does not even cover the header (0x150 bytes).
    TooSmall { len: usize },
    /// Header byte 0x148 is not a known ROM size code.
    UnknownRomSize(u8),
    /// Header byte 0x149 is not a known RAM size code.
    UnknownRamSize(u8),
    /// The image is shorter than the ROM size its header declares.
    Truncated { expected: usize, actual: usize },
    /// Header byte 0x147 names a mapper this core does not implement.
    UnsupportedMapper(u8),
}

impl std::fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartridgeError::TooSmall { len } => {
                write!(f, "ROM image too small: {} bytes, header needs 0x150", len)
            }
            CartridgeError::UnknownRomSize(code) => write!(f, "unknown ROM size code 0x{:02X}", code),
            CartridgeError::UnknownRamSize(code) => write!(f, "unknown RAM size code 0x{:02X}", code),
            CartridgeError::Truncated { expected, actual } => write!(
                f,
                "ROM image truncated: header declares {} bytes, got {}",
                expected, actual
            ),
            CartridgeError::UnsupportedMapper(kind) => {
                write!(f, "unsupported cartridge type 0x{:02X}", kind)
            }
        }
    }
}

impl std::error::Error for CartridgeError {}
