//! Pixel-processing unit: LCD timing, STAT/V-Blank interrupts and a
//! scanline renderer writing packed RGBA into the frame buffer.
mod registers;
mod render;
mod timing;

pub(crate) use registers::{Lcdc, Stat};

use dotboy_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;

/// Shade 0..=3 as packed RGBA.
const SHADES: [u32; 4] = [
    Color::WHITE.to_u32(),
    Color::LIGHT_GRAY.to_u32(),
    Color::DARK_GRAY.to_u32(),
    Color::BLACK.to_u32(),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// One OAM entry picked for the current line.
#[derive(Clone, Copy, Debug, Default)]
struct LineSprite {
    y: u8,
    x: u8,
    tile: u8,
    attrs: u8,
    index: u8,
}

pub(crate) struct Ppu {
    pub(crate) vram: [u8; VRAM_SIZE],
    pub(crate) oam: [u8; OAM_SIZE],

    lcdc: Lcdc,
    /// STAT interrupt-select bits (3..=6) only.
    stat_select: Stat,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: Mode,
    /// Dot within the current line while the LCD is on.
    dot: u32,
    /// Dots spent in mode 3 on the current line.
    transfer_len: u32,
    /// Internal window line counter.
    window_line: u8,
    /// WY matched LY at some point this frame.
    window_armed: bool,
    window_on_line: bool,
    /// Logical OR of the enabled STAT sources; the interrupt fires on its
    /// rising edge.
    stat_line: bool,

    /// Dots since the last frame boundary. Restarts at V-Blank entry and
    /// whenever the LCD is switched on or off.
    frame_dots: u32,
    frame_complete: bool,

    sprites: [LineSprite; 10],
    sprite_count: usize,

    pub(crate) render_enabled: bool,
    frame: Vec<u32>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub(crate) fn new() -> Self {
        Self {
            vram: [0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            lcdc: Lcdc::empty(),
            stat_select: Stat::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: Mode::HBlank,
            dot: 0,
            transfer_len: 0,
            window_line: 0,
            window_armed: false,
            window_on_line: false,
            stat_line: false,
            frame_dots: 0,
            frame_complete: false,
            sprites: [LineSprite::default(); 10],
            sprite_count: 0,
            render_enabled: true,
            frame: vec![SHADES[0]; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    #[inline]
    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn frame_buffer(&self) -> &[u32] {
        &self.frame
    }

    /// Dots elapsed since the last frame boundary.
    #[inline]
    pub(crate) fn frame_dots(&self) -> u32 {
        self.frame_dots
    }

    /// Returns and clears the frame-boundary flag.
    pub(crate) fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    fn clear_frame(&mut self) {
        self.frame.fill(SHADES[0]);
    }

    /// VRAM is closed to the CPU during mode 3.
    pub(crate) fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != Mode::Transfer
    }

    /// OAM is closed to the CPU during modes 2 and 3.
    pub(crate) fn oam_accessible(&self) -> bool {
        !self.lcd_enabled() || matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }
}
