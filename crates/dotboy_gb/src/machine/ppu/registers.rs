use bitflags::bitflags;

use super::{Mode, Ppu};
use crate::machine::interrupts::Interrupts;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Lcdc: u8 {
        const BG_WINDOW_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        const OBJ_TALL = 1 << 2;
        const BG_MAP_HIGH = 1 << 3;
        const TILE_DATA_UNSIGNED = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// STAT (0xFF41) interrupt selects and the LYC=LY flag.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Stat: u8 {
        const COINCIDENCE = 1 << 2;
        const HBLANK_INT = 1 << 3;
        const VBLANK_INT = 1 << 4;
        const OAM_INT = 1 << 5;
        const LYC_INT = 1 << 6;
    }
}

impl Ppu {
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.read_stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    fn read_stat(&self) -> u8 {
        let mut value = 0x80 | self.stat_select.bits();
        if self.ly == self.lyc {
            value |= Stat::COINCIDENCE.bits();
        }
        if self.lcd_enabled() {
            value |= self.mode as u8;
        }
        value
    }

    pub(crate) fn write_register(&mut self, addr: u16, value: u8, interrupts: &mut Interrupts) {
        match addr {
            0xFF40 => self.write_lcdc(value, interrupts),
            0xFF41 => {
                self.stat_select = Stat::from_bits_truncate(value & 0x78);
                self.update_stat_line(interrupts);
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.update_stat_line(interrupts);
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8, interrupts: &mut Interrupts) {
        let was_on = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);
        let now_on = self.lcd_enabled();

        if was_on && !now_on {
            log::debug!("LCD off");
            self.ly = 0;
            self.dot = 0;
            self.mode = Mode::HBlank;
            self.stat_line = false;
            self.frame_dots = 0;
            self.clear_frame();
        } else if !was_on && now_on {
            log::debug!("LCD on");
            self.ly = 0;
            self.dot = 0;
            self.window_line = 0;
            self.window_armed = false;
            self.frame_dots = 0;
            self.start_line(interrupts);
        }
    }
}
