//! Dot clock: timing, scroll-register maintenance and pixel compositing.
//!
//! Order of work within one dot: pixel output, then `v` maintenance, then
//! status events, then the dot/scanline counters advance.

use std::rc::Rc;

use super::{
    DOTS_PER_SCANLINE, NES_WIDTH, PRE_RENDER_SCANLINE, Ppu, PpuMask, PpuStatus,
    SCANLINES_PER_FRAME, VBLANK_SCANLINE, color_argb,
};

impl Ppu {
    /// Advance the PPU by one dot.
    pub fn tick(&mut self) {
        let rendering = self.rendering_enabled();
        let visible = self.scanline < 240;
        let pre_render = self.scanline == PRE_RENDER_SCANLINE;

        if rendering && visible && (1..=256).contains(&self.dot) {
            self.render_pixel();
        }
        if rendering && (visible || pre_render) {
            self.maintain_scroll(pre_render);
        }

        if self.dot == 1 {
            if self.scanline == VBLANK_SCANLINE {
                self.status.insert(PpuStatus::VBLANK);
            } else if pre_render {
                self.status.remove(
                    PpuStatus::VBLANK | PpuStatus::SPRITE_ZERO_HIT | PpuStatus::SPRITE_OVERFLOW,
                );
            }
        }

        self.advance(rendering && pre_render);
    }

    fn advance(&mut self, rendering_pre_render: bool) {
        // Odd frames drop the last dot of the pre-render line.
        if rendering_pre_render && self.odd_frame && self.dot == DOTS_PER_SCANLINE - 2 {
            self.dot = DOTS_PER_SCANLINE - 1;
        }
        self.dot += 1;
        if self.dot < DOTS_PER_SCANLINE {
            return;
        }
        self.dot = 0;
        self.scanline += 1;
        if self.scanline == SCANLINES_PER_FRAME {
            self.scanline = 0;
            self.frame += 1;
            self.odd_frame = !self.odd_frame;
            self.frame_complete = true;
        }
    }

    fn maintain_scroll(&mut self, pre_render: bool) {
        match self.dot {
            256 => {
                self.increment_coarse_x();
                self.increment_y();
            }
            8..=255 if self.dot % 8 == 0 => self.increment_coarse_x(),
            257 => {
                // hori(v) = hori(t)
                self.v = (self.v & !0x041F) | (self.t & 0x041F);
            }
            280..=304 if pre_render => {
                // vert(v) = vert(t)
                self.v = (self.v & !0x7BE0) | (self.t & 0x7BE0);
            }
            _ => {}
        }
    }

    fn increment_coarse_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    fn increment_y(&mut self) {
        if self.v & 0x7000 != 0x7000 {
            self.v += 0x1000;
            return;
        }
        self.v &= !0x7000;
        let mut coarse_y = (self.v & 0x03E0) >> 5;
        if coarse_y == 29 {
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            // Attribute rows wrap without switching nametables.
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !0x03E0) | (coarse_y << 5);
    }

    fn render_pixel(&mut self) {
        let x = self.dot - 1;
        let y = self.scanline;

        let mut color = 0u8;
        if let Some(mapper) = self.mapper.as_ref().map(Rc::clone) {
            let mapper = mapper.borrow();
            let left_edge = x < 8;

            let bg = if self.mask.contains(PpuMask::SHOW_BACKGROUND)
                && !(left_edge && !self.mask.contains(PpuMask::SHOW_BACKGROUND_LEFT))
            {
                self.background_pixel(&*mapper, x)
            } else {
                0
            };
            let sprite = if self.mask.contains(PpuMask::SHOW_SPRITES)
                && !(left_edge && !self.mask.contains(PpuMask::SHOW_SPRITES_LEFT))
            {
                self.sprite_pixel(&*mapper, x, y)
            } else {
                None
            };

            let bg_opaque = bg & 0x03 != 0;
            color = match sprite {
                Some(s) => {
                    if s.sprite_zero && bg_opaque && x != 255 {
                        self.status.insert(PpuStatus::SPRITE_ZERO_HIT);
                    }
                    if bg_opaque && s.behind_background {
                        bg
                    } else {
                        s.color
                    }
                }
                None => bg,
            };
        }

        let mut entry = self.palette_entry(color);
        if self.mask.contains(PpuMask::GREYSCALE) {
            entry &= 0x30;
        }
        self.framebuffer[y as usize * NES_WIDTH + x as usize] = color_argb(entry);
    }
}

#[cfg(test)]
mod tests {
    use crate::ppu::test_support::{ppu_with_chr_ram, write_tile};
    use crate::ppu::{NES_WIDTH, Ppu, PpuStatus, color_argb};

    const DOTS_PER_FRAME: usize = 262 * 341;

    fn run_until(ppu: &mut Ppu, scanline: u16, dot: u16) {
        while !(ppu.scanline == scanline && ppu.dot == dot) {
            ppu.tick();
        }
    }

    #[test]
    fn blank_frame_sets_and_clears_vblank() {
        let mut ppu = Ppu::new();
        let before = ppu.framebuffer().to_vec();

        run_until(&mut ppu, 241, 1);
        assert!(!ppu.status.contains(PpuStatus::VBLANK), "not yet processed");
        ppu.tick();
        assert!(ppu.status.contains(PpuStatus::VBLANK), "set at (241,1)");

        run_until(&mut ppu, 261, 1);
        assert!(ppu.status.contains(PpuStatus::VBLANK));
        ppu.tick();
        assert!(!ppu.status.contains(PpuStatus::VBLANK), "cleared at (261,1)");

        assert_eq!(ppu.framebuffer(), &before[..], "no pixels written with rendering off");
    }

    #[test]
    fn full_frame_of_ticks_wraps_to_origin() {
        let mut ppu = Ppu::new();
        let mut vblank_seen = false;
        for _ in 0..DOTS_PER_FRAME {
            ppu.tick();
            vblank_seen |= ppu.status.contains(PpuStatus::VBLANK);
        }
        assert!(vblank_seen);
        assert_eq!((ppu.scanline, ppu.dot), (0, 0));
        assert!(!ppu.status.contains(PpuStatus::VBLANK));
        assert!(ppu.take_frame_complete());
        assert!(!ppu.take_frame_complete(), "latch is consumed");
        assert_eq!(ppu.frame(), 1);
    }

    #[test]
    fn odd_frame_skips_a_dot_when_rendering() {
        let mut ppu = Ppu::new();
        ppu.mask = crate::ppu::PpuMask::SHOW_BACKGROUND;
        let count = |ppu: &mut Ppu| {
            let mut n = 0usize;
            loop {
                ppu.tick();
                n += 1;
                if ppu.take_frame_complete() {
                    return n;
                }
            }
        };
        assert_eq!(count(&mut ppu), DOTS_PER_FRAME, "even frame is full length");
        assert_eq!(count(&mut ppu), DOTS_PER_FRAME - 1, "odd frame is one dot short");
        assert_eq!(count(&mut ppu), DOTS_PER_FRAME);

        ppu.mask = crate::ppu::PpuMask::empty();
        assert_eq!(count(&mut ppu), DOTS_PER_FRAME, "no skip with rendering off");
    }

    #[test]
    fn nmi_line_follows_vblank_and_ctrl() {
        let mut ppu = Ppu::new();
        run_until(&mut ppu, 241, 2);
        assert!(!ppu.nmi_line(), "NMI disabled in ctrl");
        ppu.write_register(0x2000, 0x80);
        assert!(ppu.nmi_line(), "enabling during vblank raises the line");
        ppu.read_register(0x2002);
        assert!(!ppu.nmi_line(), "status read drops it");
    }

    #[test]
    fn scroll_registers_track_pipeline_offsets() {
        let (mut ppu, _m) = ppu_with_chr_ram();
        ppu.mask = crate::ppu::PpuMask::SHOW_BACKGROUND;
        // t: coarse X 5, coarse Y 3, fine Y 2, nametable 1.
        ppu.t = (2 << 12) | (1 << 10) | (3 << 5) | 5;
        ppu.v = ppu.t;
        ppu.scanline = 0;
        ppu.dot = 1;

        run_until(&mut ppu, 0, 9);
        assert_eq!(ppu.v & 0x1F, 6, "one coarse-X step after dot 8");

        run_until(&mut ppu, 0, 257);
        assert_eq!((ppu.v >> 12) & 7, 3, "fine Y stepped at dot 256");
        ppu.v ^= 0x0007;
        ppu.tick();
        assert_eq!(ppu.v & 0x041F, ppu.t & 0x041F, "horizontal copy at 257");

        run_until(&mut ppu, 261, 305);
        assert_eq!(ppu.v & 0x7BE0, ppu.t & 0x7BE0, "vertical copy on pre-render line");
    }

    #[test]
    fn coarse_y_wraps_at_29_into_next_nametable() {
        let mut ppu = Ppu::new();
        ppu.v = (7 << 12) | (29 << 5);
        ppu.increment_y();
        assert_eq!(ppu.v, 0x0800);
        ppu.v = (7 << 12) | (31 << 5);
        ppu.increment_y();
        assert_eq!(ppu.v, 0x0000, "rows 30/31 wrap without flipping");
    }

    #[test]
    fn renders_background_and_sprite_zero_hit() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 1, [0xFF; 8], [0; 8]);
        mapper.borrow_mut().write_graphics(0x2000 + 1, 1);
        ppu.palette[0x00] = 0x0F;
        ppu.palette[0x01] = 0x21;
        ppu.palette[0x11] = 0x16;
        // Sprite 0 over tile column 1 on scanline 4.
        ppu.oam[0..4].copy_from_slice(&[3, 1, 0, 8]);
        ppu.mask = crate::ppu::PpuMask::all() - crate::ppu::PpuMask::GREYSCALE;

        run_until(&mut ppu, 3, 20);
        assert!(!ppu.status.contains(PpuStatus::SPRITE_ZERO_HIT));
        assert_eq!(ppu.framebuffer()[3 * NES_WIDTH + 2], color_argb(0x0F), "backdrop");
        assert_eq!(ppu.framebuffer()[3 * NES_WIDTH + 9], color_argb(0x21), "background");

        run_until(&mut ppu, 4, 20);
        assert!(ppu.status.contains(PpuStatus::SPRITE_ZERO_HIT));
        assert_eq!(ppu.framebuffer()[4 * NES_WIDTH + 9], color_argb(0x16), "sprite in front");

        run_until(&mut ppu, 261, 2);
        assert!(!ppu.status.contains(PpuStatus::SPRITE_ZERO_HIT), "cleared on pre-render");
    }

    #[test]
    fn left_clip_hides_background() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        write_tile(&mapper, 0x0000, 0, [0xFF; 8], [0; 8]);
        ppu.palette[0x00] = 0x0F;
        ppu.palette[0x01] = 0x21;
        ppu.mask = crate::ppu::PpuMask::SHOW_BACKGROUND;
        run_until(&mut ppu, 0, 20);
        assert_eq!(ppu.framebuffer()[3], color_argb(0x0F), "clipped to backdrop");
        assert_eq!(ppu.framebuffer()[12], color_argb(0x21));
    }
}
