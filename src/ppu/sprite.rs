//! Sprite lookup for a single screen coordinate.
//!
//! All 64 OAM entries are scanned in index order for every pixel; there is no
//! eight-per-line limit and no overflow detection. The first entry with an
//! opaque pixel at (x, y) wins.
//!
//! OAM entry layout: `[y, tile, attributes, x]`, where the sprite's first row
//! is drawn on scanline `y + 1`. Attributes: bits 0..1 palette, bit 5 behind
//! background, bit 6 horizontal flip, bit 7 vertical flip.

use super::{Ppu, PpuCtrl};
use crate::mapper::Mapper;

const ATTR_BEHIND_BACKGROUND: u8 = 0x20;
const ATTR_FLIP_H: u8 = 0x40;
const ATTR_FLIP_V: u8 = 0x80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(in crate::ppu) struct SpritePixel {
    /// Palette RAM index ($10..=$1F range).
    pub color: u8,
    pub behind_background: bool,
    pub sprite_zero: bool,
}

impl Ppu {
    #[inline]
    fn sprite_height(&self) -> u16 {
        if self.ctrl.contains(PpuCtrl::SPRITE_SIZE_16) {
            16
        } else {
            8
        }
    }

    pub(in crate::ppu) fn sprite_pixel(&self, mapper: &dyn Mapper, x: u16, y: u16) -> Option<SpritePixel> {
        let height = self.sprite_height();
        for (index, entry) in self.oam.chunks_exact(4).enumerate() {
            let top = entry[0] as u16 + 1;
            let left = entry[3] as u16;
            if y < top || y >= top + height || x < left || x >= left + 8 {
                continue;
            }
            let attr = entry[2];
            let mut row = y - top;
            let mut col = x - left;
            if attr & ATTR_FLIP_V != 0 {
                row = height - 1 - row;
            }
            if attr & ATTR_FLIP_H != 0 {
                col = 7 - col;
            }

            let tile = entry[1] as u16;
            let tile_addr = if height == 16 {
                let table = (tile & 0x01) * 0x1000;
                let top_tile = tile & 0xFE;
                let (t, r) = if row >= 8 { (top_tile + 1, row - 8) } else { (top_tile, row) };
                table + t * 16 + r
            } else {
                let table = if self.ctrl.contains(PpuCtrl::SPRITE_TABLE) {
                    0x1000
                } else {
                    0x0000
                };
                table + tile * 16 + row
            };

            let lo = mapper.read_graphics(tile_addr);
            let hi = mapper.read_graphics(tile_addr + 8);
            let bit = 7 - col;
            let pattern = ((lo >> bit) & 1) | (((hi >> bit) & 1) << 1);
            if pattern == 0 {
                continue;
            }
            return Some(SpritePixel {
                color: 0x10 | ((attr & 0x03) << 2) | pattern,
                behind_background: attr & ATTR_BEHIND_BACKGROUND != 0,
                sprite_zero: index == 0,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::test_support::{ppu_with_chr_ram, write_tile};

    fn place(ppu: &mut Ppu, index: usize, y: u8, tile: u8, attr: u8, x: u8) {
        ppu.oam[index * 4..index * 4 + 4].copy_from_slice(&[y, tile, attr, x]);
    }

    #[test]
    fn sprite_drawn_one_line_below_oam_y() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 1, [0xFF; 8], [0; 8]);
        place(&mut ppu, 0, 9, 1, 0x02, 20);
        let m = mapper.borrow();
        assert_eq!(ppu.sprite_pixel(&*m, 20, 9), None);
        let px = ppu.sprite_pixel(&*m, 20, 10).expect("sprite row 0");
        assert_eq!(px.color, 0x10 | (2 << 2) | 1);
        assert!(px.sprite_zero);
        assert!(ppu.sprite_pixel(&*m, 27, 17).is_some());
        assert_eq!(ppu.sprite_pixel(&*m, 28, 10), None);
        assert_eq!(ppu.sprite_pixel(&*m, 20, 18), None);
    }

    #[test]
    fn lower_index_wins_when_opaque() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 1, [0x0F; 8], [0; 8]);
        write_tile(&mapper, 0x0000, 2, [0xFF; 8], [0xFF; 8]);
        place(&mut ppu, 0, 0xFF, 0, 0, 0);
        place(&mut ppu, 3, 0, 1, 0x00, 0);
        place(&mut ppu, 7, 0, 2, 0x01, 0);
        let m = mapper.borrow();
        // Sprite 3 is transparent in its left half, so sprite 7 shows through.
        assert_eq!(ppu.sprite_pixel(&*m, 0, 1).map(|p| p.color), Some(0x10 | (1 << 2) | 3));
        assert_eq!(ppu.sprite_pixel(&*m, 4, 1).map(|p| p.color), Some(0x11));
    }

    #[test]
    fn flips_mirror_pattern() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 1, [0x80, 0, 0, 0, 0, 0, 0, 0], [0; 8]);
        place(&mut ppu, 0, 0, 1, ATTR_FLIP_H | ATTR_FLIP_V, 0);
        let m = mapper.borrow();
        assert_eq!(ppu.sprite_pixel(&*m, 0, 1), None);
        assert!(ppu.sprite_pixel(&*m, 7, 8).is_some(), "top-left pixel lands bottom-right");
    }

    #[test]
    fn tall_sprites_use_tile_bit0_table() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        ppu.ctrl.insert(PpuCtrl::SPRITE_SIZE_16);
        write_tile(&mapper, 0x1000, 4, [0; 8], [0; 8]);
        write_tile(&mapper, 0x1000, 5, [0xFF; 8], [0; 8]);
        // Tile index 5: table $1000, tiles 4 (top) and 5 (bottom).
        place(&mut ppu, 0, 0, 5, 0, 0);
        let m = mapper.borrow();
        assert_eq!(ppu.sprite_pixel(&*m, 0, 1), None, "top half is blank");
        assert!(ppu.sprite_pixel(&*m, 0, 9).is_some(), "bottom half opaque");
        assert!(ppu.sprite_pixel(&*m, 0, 16).is_some());
        assert_eq!(ppu.sprite_pixel(&*m, 0, 17), None);
    }

    #[test]
    fn priority_bit_reported() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 1, [0xFF; 8], [0; 8]);
        place(&mut ppu, 1, 0, 1, ATTR_BEHIND_BACKGROUND, 0);
        let m = mapper.borrow();
        let px = ppu.sprite_pixel(&*m, 0, 1).expect("opaque");
        assert!(px.behind_background);
        assert!(!px.sprite_zero);
    }
}
