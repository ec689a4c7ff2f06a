pub mod buttons;

pub use buttons::Buttons;

/// A single output pixel.
///
/// Frame buffers store pixels packed with [`Color::to_u32`], which lays the
/// channels out as `R, G, B, A` in memory on little-endian hosts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xAA, 0xAA, 0xAA);
    pub const DARK_GRAY: Color = Color::new_rgb(0x55, 0x55, 0x55);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    #[inline]
    pub const fn to_u32(&self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    #[inline]
    pub const fn from_u32(value: u32) -> Color {
        let [r, g, b, a] = value.to_le_bytes();
        Color { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_rgba_in_memory_order() {
        let c = Color::new_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_u32().to_le_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Color::from_u32(c.to_u32()), c);
    }
}
