use super::{Lcdc, Mode, Ppu, Stat};
use crate::machine::interrupts::{InterruptFlags, Interrupts};
use crate::CYCLES_PER_FRAME;

pub(crate) const DOTS_PER_LINE: u32 = 456;
pub(crate) const LINES_PER_FRAME: u8 = 154;
pub(crate) const VISIBLE_LINES: u8 = 144;
const OAM_SCAN_DOTS: u32 = 80;
const BASE_TRANSFER_DOTS: u32 = 172;

impl Ppu {
    /// Advance by `cycles` dots (one dot per T-cycle on the DMG).
    ///
    /// With the LCD on a frame ends on entry to V-Blank. With it off a
    /// frame ends every 70 224 dots of the free-running clock.
    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut Interrupts) {
        for _ in 0..cycles {
            self.frame_dots += 1;
            if self.lcd_enabled() {
                self.tick_dot(interrupts);
            } else if self.frame_dots == CYCLES_PER_FRAME {
                self.end_frame();
            }
        }
    }

    fn end_frame(&mut self) {
        self.frame_dots = 0;
        self.frame_complete = true;
    }

    fn tick_dot(&mut self, interrupts: &mut Interrupts) {
        self.dot += 1;

        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.ly += 1;
            if self.ly == LINES_PER_FRAME {
                self.ly = 0;
                self.window_line = 0;
                self.window_armed = false;
            }
            self.start_line(interrupts);
            return;
        }

        if self.ly >= VISIBLE_LINES {
            return;
        }

        if self.dot == OAM_SCAN_DOTS {
            self.start_transfer();
            self.update_stat_line(interrupts);
        } else if self.mode == Mode::Transfer && self.dot == OAM_SCAN_DOTS + self.transfer_len {
            self.mode = Mode::HBlank;
            self.update_stat_line(interrupts);
        }
    }

    /// Enter dot 0 of line `ly`: OAM scan for visible lines, V-Blank from
    /// line 144 on.
    pub(super) fn start_line(&mut self, interrupts: &mut Interrupts) {
        if self.ly < VISIBLE_LINES {
            self.mode = Mode::OamScan;
            self.select_sprites();
        } else if self.ly == VISIBLE_LINES {
            self.mode = Mode::VBlank;
            interrupts.request(InterruptFlags::VBLANK);
            self.end_frame();
        }
        self.update_stat_line(interrupts);
    }

    fn start_transfer(&mut self) {
        self.mode = Mode::Transfer;

        if self.ly == self.wy {
            self.window_armed = true;
        }
        self.window_on_line = self.lcdc.contains(Lcdc::BG_WINDOW_ENABLE)
            && self.lcdc.contains(Lcdc::WINDOW_ENABLE)
            && self.window_armed
            && self.wx <= 166;

        self.transfer_len = BASE_TRANSFER_DOTS
            + (self.scx % 8) as u32
            + 6 * self.sprite_count as u32
            + if self.window_on_line { 6 } else { 0 };

        if self.render_enabled {
            self.render_line();
        }
        if self.window_on_line {
            self.window_line = self.window_line.wrapping_add(1);
        }
    }

    /// Dot 0 of line 144 also drives the mode-2 source.
    fn vblank_entry(&self) -> bool {
        self.ly == VISIBLE_LINES && self.dot == 0
    }

    /// Recompute the STAT interrupt line and request INT 48 on its rising
    /// edge.
    pub(super) fn update_stat_line(&mut self, interrupts: &mut Interrupts) {
        if !self.lcd_enabled() {
            self.stat_line = false;
            return;
        }

        let select = self.stat_select;
        let line = (select.contains(Stat::LYC_INT) && self.ly == self.lyc)
            || (select.contains(Stat::HBLANK_INT) && self.mode == Mode::HBlank)
            || (select.contains(Stat::VBLANK_INT) && self.mode == Mode::VBlank)
            || (select.contains(Stat::OAM_INT)
                && (self.mode == Mode::OamScan || self.vblank_entry()));

        if line && !self.stat_line {
            log::debug!("STAT interrupt: LY={} mode={:?}", self.ly, self.mode);
            interrupts.request(InterruptFlags::STAT);
        }
        self.stat_line = line;
    }
}
