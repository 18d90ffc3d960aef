//! PPU address-space routing, palette RAM mirroring and OAM access.
//!
//! $0000..=$3EFF goes to the mapper (pattern tables + nametables), $3F00..=$3FFF
//! to the 32-byte palette RAM. Without a mapper, graphics reads return 0 and
//! writes vanish.

use super::Ppu;

/// Palette RAM index for a $3F00..=$3FFF address. Entries $10/$14/$18/$1C alias
/// their background counterparts.
#[inline]
pub(crate) fn palette_index(addr: u16) -> usize {
    let mut idx = addr & 0x1F;
    if idx & 0x13 == 0x10 {
        idx &= !0x10;
    }
    idx as usize
}

impl Ppu {
    pub(in crate::ppu) fn read_vram(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if addr >= 0x3F00 {
            return self.palette[palette_index(addr)] & 0x3F;
        }
        match &self.mapper {
            Some(m) => m.borrow().read_graphics(addr),
            None => 0,
        }
    }

    pub(in crate::ppu) fn write_vram(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        if addr >= 0x3F00 {
            self.palette[palette_index(addr)] = value & 0x3F;
            return;
        }
        if let Some(m) = &self.mapper {
            m.borrow_mut().write_graphics(addr, value);
        }
    }

    /// Palette entry used for the final pixel colour lookup.
    #[inline]
    pub(in crate::ppu) fn palette_entry(&self, index: u8) -> u8 {
        self.palette[palette_index(index as u16)]
    }

    /// OAMDATA write path: store at the cursor, then advance it. DMA uses this too.
    pub fn write_oam_data(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /// OAMDATA read: return the byte under the cursor, then advance it.
    pub(in crate::ppu) fn read_oam_data(&mut self) -> u8 {
        let value = self.oam[self.oam_addr as usize];
        self.oam_addr = self.oam_addr.wrapping_add(1);
        value
    }

    pub fn peek_oam(&self, idx: u8) -> u8 {
        self.oam[idx as usize]
    }

    /// Debug/inspection read of the PPU address space without side effects.
    pub fn peek_vram(&self, addr: u16) -> u8 {
        self.read_vram(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppu::test_support::ppu_with_chr_ram;

    #[test]
    fn backdrop_entries_alias() {
        assert_eq!(palette_index(0x3F10), 0x00);
        assert_eq!(palette_index(0x3F14), 0x04);
        assert_eq!(palette_index(0x3F18), 0x08);
        assert_eq!(palette_index(0x3F1C), 0x0C);
        assert_eq!(palette_index(0x3F11), 0x11, "sprite colours 1..3 stay separate");
        assert_eq!(palette_index(0x3F25), 0x05, "$3F20..$3FFF mirrors every 32 bytes");
    }

    #[test]
    fn palette_write_through_mirror() {
        let (mut ppu, _m) = ppu_with_chr_ram();
        ppu.write_vram(0x3F10, 0x2A);
        assert_eq!(ppu.read_vram(0x3F00), 0x2A);
        ppu.write_vram(0x3F04, 0x11);
        assert_eq!(ppu.read_vram(0x3F14), 0x11);
    }

    #[test]
    fn graphics_space_goes_to_mapper() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        ppu.write_vram(0x0100, 0x77);
        ppu.write_vram(0x2001, 0x55);
        assert_eq!(mapper.borrow().read_graphics(0x0100), 0x77);
        assert_eq!(mapper.borrow().read_graphics(0x2801), 0x55, "vertical mirroring");
        assert_eq!(ppu.read_vram(0x3001), 0x55, "$3000 mirrors $2000");
    }

    #[test]
    fn peek_vram_leaves_address_and_buffer_alone() {
        let (mut ppu, mapper) = ppu_with_chr_ram();
        mapper.borrow_mut().write_graphics(0x2003, 0x4E);
        ppu.write_vram(0x3F00, 0x21);
        ppu.write_register(0x2006, 0x20);
        ppu.write_register(0x2006, 0x00);
        assert_eq!(ppu.peek_vram(0x2003), 0x4E);
        assert_eq!(ppu.peek_vram(0x3F10), 0x21, "backdrop mirror");
        assert_eq!(ppu.vram_addr(), 0x2000);
        assert_eq!(ppu.read_buffer, 0);
    }

    #[test]
    fn no_mapper_reads_zero() {
        let mut ppu = Ppu::new();
        ppu.write_vram(0x2000, 0x12);
        assert_eq!(ppu.read_vram(0x2000), 0);
    }

    #[test]
    fn oam_cursor_advances_and_wraps() {
        let mut ppu = Ppu::new();
        ppu.oam_addr = 0xFF;
        ppu.write_oam_data(0xAB);
        assert_eq!(ppu.oam_addr, 0x00);
        assert_eq!(ppu.peek_oam(0xFF), 0xAB);
        ppu.oam_addr = 0xFF;
        assert_eq!(ppu.read_oam_data(), 0xAB);
        assert_eq!(ppu.oam_addr, 0x00, "reads advance the cursor too");
    }
}
