use super::{Lcdc, LineSprite, Ppu, SHADES};
use crate::SCREEN_WIDTH;

const BG_MAP_LOW: usize = 0x1800;
const BG_MAP_HIGH: usize = 0x1C00;
const MAX_SPRITES_PER_LINE: usize = 10;

const ATTR_BEHIND_BG: u8 = 1 << 7;
const ATTR_FLIP_Y: u8 = 1 << 6;
const ATTR_FLIP_X: u8 = 1 << 5;
const ATTR_PALETTE1: u8 = 1 << 4;

impl Ppu {
    fn sprite_height(&self) -> u8 {
        if self.lcdc.contains(Lcdc::OBJ_TALL) {
            16
        } else {
            8
        }
    }

    /// Mode 2: pick up to ten sprites overlapping LY, in OAM order.
    pub(super) fn select_sprites(&mut self) {
        self.sprite_count = 0;
        if !self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            return;
        }

        let height = self.sprite_height() as u16;
        let line = self.ly as u16 + 16;
        for (index, entry) in self.oam.chunks_exact(4).enumerate() {
            let y = entry[0] as u16;
            if line >= y && line < y + height {
                self.sprites[self.sprite_count] = LineSprite {
                    y: entry[0],
                    x: entry[1],
                    tile: entry[2],
                    attrs: entry[3],
                    index: index as u8,
                };
                self.sprite_count += 1;
                if self.sprite_count == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }
    }

    /// Colour index (0..=3) of pixel (`px`, `py`) in the 256x256 plane
    /// described by the tile map at `map_base`.
    fn map_pixel(&self, map_base: usize, px: u8, py: u8) -> u8 {
        let map_index = map_base + (py as usize / 8) * 32 + px as usize / 8;
        let tile = self.vram[map_index];
        let tile_addr = if self.lcdc.contains(Lcdc::TILE_DATA_UNSIGNED) {
            tile as usize * 16
        } else {
            (0x1000 + (tile as i8 as isize) * 16) as usize
        };
        self.tile_pixel(tile_addr, py % 8, px % 8)
    }

    #[inline]
    fn tile_pixel(&self, tile_addr: usize, row: u8, col: u8) -> u8 {
        let addr = tile_addr + row as usize * 2;
        let lo = self.vram[addr];
        let hi = self.vram[addr + 1];
        let bit = 7 - col;
        (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
    }

    /// Colour index of `sprite` at screen column `x`, or `None` when the
    /// sprite does not cover it or the pixel is transparent.
    fn sprite_pixel(&self, sprite: &LineSprite, x: usize) -> Option<u8> {
        let col = (x + 8).checked_sub(sprite.x as usize)?;
        if col >= 8 {
            return None;
        }
        let height = self.sprite_height();
        let mut row = (self.ly + 16).wrapping_sub(sprite.y);
        if row >= height {
            return None;
        }
        if sprite.attrs & ATTR_FLIP_Y != 0 {
            row = height - 1 - row;
        }
        let col = if sprite.attrs & ATTR_FLIP_X != 0 {
            7 - col as u8
        } else {
            col as u8
        };
        let tile = if height == 16 {
            sprite.tile & 0xFE
        } else {
            sprite.tile
        };
        let color = self.tile_pixel(tile as usize * 16, row, col);
        (color != 0).then_some(color)
    }

    /// Draw row `ly` into the frame buffer.
    pub(super) fn render_line(&mut self) {
        let mut bg = [0u8; SCREEN_WIDTH];

        if self.lcdc.contains(Lcdc::BG_WINDOW_ENABLE) {
            let bg_map = if self.lcdc.contains(Lcdc::BG_MAP_HIGH) {
                BG_MAP_HIGH
            } else {
                BG_MAP_LOW
            };
            let window_map = if self.lcdc.contains(Lcdc::WINDOW_MAP_HIGH) {
                BG_MAP_HIGH
            } else {
                BG_MAP_LOW
            };
            let bg_y = self.ly.wrapping_add(self.scy);

            for (x, slot) in bg.iter_mut().enumerate() {
                let in_window = self.window_on_line && x + 7 >= self.wx as usize;
                *slot = if in_window {
                    let wx = (x + 7 - self.wx as usize) as u8;
                    self.map_pixel(window_map, wx, self.window_line)
                } else {
                    self.map_pixel(bg_map, (x as u8).wrapping_add(self.scx), bg_y)
                };
            }
        }

        // Lower X wins; equal X keeps OAM order (selection order).
        let mut order = [LineSprite::default(); MAX_SPRITES_PER_LINE];
        let order = &mut order[..self.sprite_count];
        order.copy_from_slice(&self.sprites[..self.sprite_count]);
        order.sort_by_key(|s| s.x);

        let mut row = [SHADES[0]; SCREEN_WIDTH];
        for (x, out) in row.iter_mut().enumerate() {
            let bg_color = bg[x];
            let mut shade = (self.bgp >> (bg_color * 2)) & 0x03;

            let hit = order
                .iter()
                .find_map(|s| self.sprite_pixel(s, x).map(|c| (s, c)));
            if let Some((sprite, color)) = hit {
                let hidden = sprite.attrs & ATTR_BEHIND_BG != 0 && bg_color != 0;
                if !hidden {
                    let palette = if sprite.attrs & ATTR_PALETTE1 != 0 {
                        self.obp1
                    } else {
                        self.obp0
                    };
                    shade = (palette >> (color * 2)) & 0x03;
                }
            }

            *out = SHADES[shade as usize];
        }

        let start = self.ly as usize * SCREEN_WIDTH;
        self.frame[start..start + SCREEN_WIDTH].copy_from_slice(&row);
    }
}
