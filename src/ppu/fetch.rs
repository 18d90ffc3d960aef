//! Background pixel lookup straight from the live VRAM address.
//!
//! `v` holds the tile column for the current 8-dot group (coarse-X is bumped
//! after dots 8, 16, ..., 256), so the pixel at screen x sits `fine_x + (x & 7)`
//! pixels into that column: 0..=14, i.e. possibly one tile further on. That
//! extra tile can carry across the right edge of the nametable, which flips the
//! horizontal nametable bit.

use super::{Ppu, PpuCtrl};
use crate::mapper::Mapper;

impl Ppu {
    /// Background colour for screen column `x` on the current scanline as a
    /// 4-bit palette RAM index (`palette << 2 | pattern`), or 0 when transparent.
    pub(in crate::ppu) fn background_pixel(&self, mapper: &dyn Mapper, x: u16) -> u8 {
        let v = self.v;
        let fine_y = (v >> 12) & 0x07;
        let coarse_y = (v >> 5) & 0x1F;
        let mut nametable = (v >> 10) & 0x03;

        let offset = self.fine_x as u16 + (x & 0x07);
        let mut coarse_x = (v & 0x1F) + (offset >> 3);
        if coarse_x > 31 {
            coarse_x -= 32;
            nametable ^= 0x01;
        }
        let fine = offset & 0x07;

        let nt_base = 0x2000 | (nametable << 10);
        let tile = mapper.read_graphics(nt_base | (coarse_y << 5) | coarse_x) as u16;
        let attr = mapper.read_graphics(nt_base | 0x03C0 | ((coarse_y >> 2) << 3) | (coarse_x >> 2));
        let shift = ((coarse_y & 0x02) << 1) | (coarse_x & 0x02);
        let palette = (attr >> shift) & 0x03;

        let table = if self.ctrl.contains(PpuCtrl::BACKGROUND_TABLE) {
            0x1000
        } else {
            0x0000
        };
        let row_addr = table + tile * 16 + fine_y;
        let lo = mapper.read_graphics(row_addr);
        let hi = mapper.read_graphics(row_addr + 8);
        let bit = 7 - fine;
        let pattern = ((lo >> bit) & 1) | (((hi >> bit) & 1) << 1);
        if pattern == 0 {
            0
        } else {
            (palette << 2) | pattern
        }
    }
}
