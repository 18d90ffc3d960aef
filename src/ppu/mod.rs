/*!
PPU: dot-stepped picture generator.

Each `tick` advances one dot of the 341 x 262 raster and does whatever work
belongs to that (scanline, dot) pair:
- dots 1..=256 of scanlines 0..=239 produce one framebuffer pixel while
  rendering is enabled;
- the loopy scroll registers (`v`, `t`, fine-X, write toggle) are maintained
  at the fixed pipeline offsets;
- vblank is raised at (241, 1) and cleared on the pre-render line (261, 1);
- the pre-render line of odd frames is one dot short when rendering is on.

Pattern and nametable bytes come from the cartridge mapper; palette RAM and
OAM live here.

STRUCTURE:
- `registers.rs`: CPU-visible $2000..=$2007 semantics.
- `memory.rs`: PPU address space routing, palette mirroring, OAM access.
- `renderer.rs`: `tick`, timing, scroll-register maintenance, compositing.
- `fetch.rs`: background pixel lookup from the live VRAM address.
- `sprite.rs`: per-pixel sprite evaluation.

`v`/`t` layout (15 bits): `yyy NN YYYYY XXXXX` = fine Y, nametable select,
coarse Y, coarse X.
*/

use bitflags::bitflags;

use crate::mapper::SharedMapper;

pub(crate) mod fetch;
pub(crate) mod memory;
pub(crate) mod registers;
pub(crate) mod renderer;
pub(crate) mod sprite;

/// Screen width in pixels.
pub const NES_WIDTH: usize = 256;
/// Screen height in pixels.
pub const NES_HEIGHT: usize = 240;

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;
pub const VBLANK_SCANLINE: u16 = 241;
pub const PRE_RENDER_SCANLINE: u16 = 261;

/// 2C02 master palette as 0xRRGGBB.
const NES_COLORS: [u32; 64] = [
    0x666666, 0x002A88, 0x1412A7, 0x3B00A4, 0x5C007E, 0x6E0040, 0x6C0700, 0x561D00,
    0x333500, 0x0B4800, 0x005200, 0x004F08, 0x00404D, 0x000000, 0x000000, 0x000000,
    0xADADAD, 0x155FD9, 0x4240FF, 0x7527FE, 0xA01ACC, 0xB71E7B, 0xB53120, 0x994E00,
    0x6B6D00, 0x388700, 0x0E9300, 0x008F32, 0x007C8D, 0x000000, 0x000000, 0x000000,
    0xFFFEFF, 0x64B0FF, 0x9290FF, 0xC676FF, 0xF36AFF, 0xFE6ECC, 0xFE8170, 0xEA9E22,
    0xBCBE00, 0x88D800, 0x5CE430, 0x45E082, 0x48CDDE, 0x4F4F4F, 0x000000, 0x000000,
    0xFFFEFF, 0xC0DFFF, 0xD3D2FF, 0xE8C8FF, 0xFBC2FF, 0xFEC4EA, 0xFECCC5, 0xF7D8A5,
    0xE4E594, 0xCFEF96, 0xBDF4AB, 0xB3F3CC, 0xB5EBF2, 0xB8B8B8, 0x000000, 0x000000,
];

/// Map a 6-bit palette entry to a packed 0xAARRGGBB pixel.
#[inline]
pub fn color_argb(index: u8) -> u32 {
    0xFF00_0000 | NES_COLORS[(index & 0x3F) as usize]
}

bitflags! {
    /// $2000
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuCtrl: u8 {
        const NAMETABLE_X = 0b0000_0001;
        const NAMETABLE_Y = 0b0000_0010;
        const VRAM_INCREMENT_32 = 0b0000_0100;
        const SPRITE_TABLE = 0b0000_1000;
        const BACKGROUND_TABLE = 0b0001_0000;
        const SPRITE_SIZE_16 = 0b0010_0000;
        const MASTER_SLAVE = 0b0100_0000;
        const GENERATE_NMI = 0b1000_0000;
    }
}

bitflags! {
    /// $2001
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuMask: u8 {
        const GREYSCALE = 0b0000_0001;
        const SHOW_BACKGROUND_LEFT = 0b0000_0010;
        const SHOW_SPRITES_LEFT = 0b0000_0100;
        const SHOW_BACKGROUND = 0b0000_1000;
        const SHOW_SPRITES = 0b0001_0000;
        const EMPHASIZE_RED = 0b0010_0000;
        const EMPHASIZE_GREEN = 0b0100_0000;
        const EMPHASIZE_BLUE = 0b1000_0000;
    }
}

bitflags! {
    /// $2002 (upper three bits; the rest reads back the I/O latch).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuStatus: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        const VBLANK = 0b1000_0000;
    }
}

pub struct Ppu {
    ctrl: PpuCtrl,
    mask: PpuMask,
    status: PpuStatus,
    oam_addr: u8,
    oam: [u8; 256],

    // Loopy registers
    v: u16,
    t: u16,
    fine_x: u8,
    write_toggle: bool,

    read_buffer: u8,
    // Last value driven on the CPU<->PPU data lines.
    io_latch: u8,

    palette: [u8; 32],

    scanline: u16,
    dot: u16,
    odd_frame: bool,
    frame: u64,
    frame_complete: bool,

    framebuffer: Vec<u32>,

    mapper: Option<SharedMapper>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("ctrl", &self.ctrl)
            .field("mask", &self.mask)
            .field("status", &self.status)
            .field("v", &format_args!("{:#06X}", self.v))
            .field("t", &format_args!("{:#06X}", self.t))
            .field("fine_x", &self.fine_x)
            .field("scanline", &self.scanline)
            .field("dot", &self.dot)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            ctrl: PpuCtrl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),
            oam_addr: 0,
            oam: [0; 256],
            v: 0,
            t: 0,
            fine_x: 0,
            write_toggle: false,
            read_buffer: 0,
            io_latch: 0,
            palette: [0; 32],
            scanline: 0,
            dot: 0,
            odd_frame: false,
            frame: 0,
            frame_complete: false,
            framebuffer: vec![0; NES_WIDTH * NES_HEIGHT],
            mapper: None,
        }
    }

    /// Connect the cartridge board that serves pattern and nametable fetches.
    pub fn attach_mapper(&mut self, mapper: SharedMapper) {
        self.mapper = Some(mapper);
    }

    pub fn detach_mapper(&mut self) {
        self.mapper = None;
    }

    /// Reset register and timing state. OAM, palette RAM and the framebuffer survive.
    pub fn reset(&mut self) {
        self.ctrl = PpuCtrl::empty();
        self.mask = PpuMask::empty();
        self.status = PpuStatus::empty();
        self.oam_addr = 0;
        self.v = 0;
        self.t = 0;
        self.fine_x = 0;
        self.write_toggle = false;
        self.read_buffer = 0;
        self.io_latch = 0;
        self.scanline = 0;
        self.dot = 0;
        self.odd_frame = false;
        self.frame_complete = false;
    }

    /// Interrupt output: high while vblank is flagged and NMI generation is enabled.
    #[inline]
    pub fn nmi_line(&self) -> bool {
        self.status.contains(PpuStatus::VBLANK) && self.ctrl.contains(PpuCtrl::GENERATE_NMI)
    }

    #[inline]
    pub fn rendering_enabled(&self) -> bool {
        self.mask
            .intersects(PpuMask::SHOW_BACKGROUND | PpuMask::SHOW_SPRITES)
    }

    /// Returns true once per completed frame (scanline wrap 261 -> 0).
    pub fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn dot(&self) -> u16 {
        self.dot
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn ctrl(&self) -> PpuCtrl {
        self.ctrl
    }

    pub fn mask(&self) -> PpuMask {
        self.mask
    }

    pub fn status(&self) -> PpuStatus {
        self.status
    }

    pub fn vram_addr(&self) -> u16 {
        self.v
    }

    pub fn temp_addr(&self) -> u16 {
        self.t
    }

    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    pub fn write_toggle(&self) -> bool {
        self.write_toggle
    }

    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }
}
