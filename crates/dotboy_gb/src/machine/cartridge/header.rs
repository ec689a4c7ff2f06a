use super::CartridgeError;

/// Smallest image that still contains the full header.
pub(crate) const HEADER_END: usize = 0x150;

const TITLE_START: usize = 0x134;
const TITLE_END: usize = 0x143;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const HEADER_CHECKSUM: usize = 0x14D;
const GLOBAL_CHECKSUM: usize = 0x14E;

/// Mapper family declared by the cartridge type byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
}

impl MapperKind {
    fn from_type_code(code: u8) -> Option<Self> {
        match code {
            0x00 | 0x08 | 0x09 => Some(Self::RomOnly),
            0x01..=0x03 => Some(Self::Mbc1),
            0x05 | 0x06 => Some(Self::Mbc2),
            0x0F..=0x13 => Some(Self::Mbc3),
            0x19..=0x1E => Some(Self::Mbc5),
            _ => None,
        }
    }
}

/// Parsed cartridge header (0x0134..0x014F).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub mapper: MapperKind,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
    /// Number of 16 KiB ROM banks.
    pub rom_banks: usize,
    /// External RAM in bytes, as declared by 0x149.
    pub ram_bytes: usize,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_END {
            return Err(CartridgeError::TooSmall { len: rom.len() });
        }

        let cartridge_type = rom[CARTRIDGE_TYPE];
        let rom_size_code = rom[ROM_SIZE];
        let ram_size_code = rom[RAM_SIZE];

        let rom_banks = match rom_size_code {
            0x00..=0x08 => 2usize << rom_size_code,
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            other => return Err(CartridgeError::UnknownRomSize(other)),
        };
        let ram_bytes = match ram_size_code {
            0x00 => 0,
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x20000,
            0x05 => 0x10000,
            other => return Err(CartridgeError::UnknownRamSize(other)),
        };

        let expected = rom_banks * 0x4000;
        if rom.len() < expected {
            return Err(CartridgeError::Truncated {
                expected,
                actual: rom.len(),
            });
        }

        let mapper = MapperKind::from_type_code(cartridge_type)
            .ok_or(CartridgeError::UnsupportedMapper(cartridge_type))?;

        let title = rom[TITLE_START..=TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii() && !b.is_ascii_control())
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        Ok(Self {
            title,
            cartridge_type,
            mapper,
            rom_size_code,
            ram_size_code,
            header_checksum: rom[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([rom[GLOBAL_CHECKSUM], rom[GLOBAL_CHECKSUM + 1]]),
            rom_banks,
            ram_bytes,
        })
    }

    /// Header checksum as the boot ROM computes it over 0x134..=0x14C.
    pub fn compute_header_checksum(rom: &[u8]) -> u8 {
        rom[TITLE_START..HEADER_CHECKSUM]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_rom() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[TITLE_START..TITLE_START + 5].copy_from_slice(b"TITLE");
        rom
    }

    #[test]
    fn parses_title_and_sizes() {
        let mut rom = blank_rom();
        rom[RAM_SIZE] = 0x02;
        let header = CartridgeHeader::parse(&rom).unwrap();
        assert_eq!(header.title, "TITLE");
        assert_eq!(header.mapper, MapperKind::RomOnly);
        assert_eq!(header.rom_banks, 2);
        assert_eq!(header.ram_bytes, 0x2000);
    }

    #[test]
    fn rejects_bad_size_codes() {
        let mut rom = blank_rom();
        rom[ROM_SIZE] = 0x20;
        assert_eq!(CartridgeHeader::parse(&rom), Err(CartridgeError::UnknownRomSize(0x20)));

        let mut rom = blank_rom();
        rom[RAM_SIZE] = 0x07;
        assert_eq!(CartridgeHeader::parse(&rom), Err(CartridgeError::UnknownRamSize(0x07)));
    }

    #[test]
    fn rejects_truncated_and_tiny_images() {
        let mut rom = blank_rom();
        rom[ROM_SIZE] = 0x01;
        assert_eq!(
            CartridgeHeader::parse(&rom),
            Err(CartridgeError::Truncated {
                expected: 0x10000,
                actual: 0x8000
            })
        );

        assert_eq!(
            CartridgeHeader::parse(&[0u8; 0x14F]),
            Err(CartridgeError::TooSmall { len: 0x14F })
        );
    }

    #[test]
    fn rejects_unknown_mapper() {
        let mut rom = blank_rom();
        rom[CARTRIDGE_TYPE] = 0xFC;
        assert_eq!(CartridgeHeader::parse(&rom), Err(CartridgeError::UnsupportedMapper(0xFC)));
    }

    #[test]
    fn checksum_over_header_bytes() {
        let rom = blank_rom();
        let expected = b"TITLE"
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1))
            .wrapping_sub(0x19 - 5);
        assert_eq!(CartridgeHeader::compute_header_checksum(&rom), expected);
    }
}
