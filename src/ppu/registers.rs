#![doc = r#"
PPU registers module

CPU-visible semantics of $2000..=$2007 (mirrored every 8 bytes up to $3FFF):

| reg   | write                                   | read                          |
|-------|-----------------------------------------|-------------------------------|
| $2000 | ctrl; nametable bits -> t[10..11]       | I/O latch                     |
| $2001 | mask                                    | I/O latch                     |
| $2002 | ignored                                 | status, clears vblank + toggle|
| $2003 | OAM cursor                              | I/O latch                     |
| $2004 | OAM write, cursor++                     | OAM read, cursor++            |
| $2005 | scroll (x then y)                       | I/O latch                     |
| $2006 | address (high then low)                 | I/O latch                     |
| $2007 | VRAM write, v += 1 or 32                | buffered VRAM read, v += 1/32 |

The second $2006 write copies t into v except inside an active fetch window,
where the commit is dropped.
"#]

use super::{Ppu, PpuCtrl, PpuMask, PpuStatus, PRE_RENDER_SCANLINE};

impl Ppu {
    /// CPU read from a PPU register address.
    pub fn read_register(&mut self, addr: u16) -> u8 {
        let value = match addr & 0x7 {
            2 => {
                let v = self.status.bits() | (self.io_latch & 0x1F);
                self.status.remove(PpuStatus::VBLANK);
                self.write_toggle = false;
                v
            }
            4 => self.read_oam_data(),
            7 => self.read_data(),
            _ => return self.io_latch,
        };
        self.io_latch = value;
        value
    }

    /// CPU write to a PPU register address.
    pub fn write_register(&mut self, addr: u16, value: u8) {
        self.io_latch = value;
        match addr & 0x7 {
            0 => {
                self.ctrl = PpuCtrl::from_bits_retain(value);
                self.t = (self.t & !0x0C00) | (((value & 0x03) as u16) << 10);
            }
            1 => self.mask = PpuMask::from_bits_retain(value),
            2 => {}
            3 => self.oam_addr = value,
            4 => self.write_oam_data(value),
            5 => self.write_scroll(value),
            6 => self.write_addr(value),
            _ => {
                self.write_vram(self.v, value);
                self.increment_vram_addr();
            }
        }
    }

    fn write_scroll(&mut self, value: u8) {
        if !self.write_toggle {
            self.t = (self.t & !0x001F) | (value >> 3) as u16;
            self.fine_x = value & 0x07;
        } else {
            self.t = (self.t & !0x73E0)
                | (((value & 0x07) as u16) << 12)
                | (((value & 0xF8) as u16) << 2);
        }
        self.write_toggle = !self.write_toggle;
    }

    fn write_addr(&mut self, value: u8) {
        if !self.write_toggle {
            self.t = (self.t & 0x00FF) | (((value & 0x3F) as u16) << 8);
        } else {
            self.t = (self.t & 0x7F00) | value as u16;
            if !self.in_fetch_window() {
                self.v = self.t;
            }
        }
        self.write_toggle = !self.write_toggle;
    }

    fn read_data(&mut self) -> u8 {
        let addr = self.v & 0x3FFF;
        let value = if addr >= 0x3F00 {
            // Palette comes back immediately; the buffer picks up the nametable
            // byte hidden underneath.
            self.read_buffer = self.read_vram(addr & 0x2FFF);
            self.read_vram(addr)
        } else {
            let buffered = self.read_buffer;
            self.read_buffer = self.read_vram(addr);
            buffered
        };
        self.increment_vram_addr();
        value
    }

    #[inline]
    fn increment_vram_addr(&mut self) {
        let step = if self.ctrl.contains(PpuCtrl::VRAM_INCREMENT_32) {
            32
        } else {
            1
        };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }

    /// True while the background pipeline owns `v`.
    pub(in crate::ppu) fn in_fetch_window(&self) -> bool {
        if !self.rendering_enabled() {
            return false;
        }
        let line_fetches = self.scanline < 240 || self.scanline == PRE_RENDER_SCANLINE;
        line_fetches && matches!(self.dot, 1..=256 | 321..=336)
    }
}
