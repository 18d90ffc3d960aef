/*!
Mapper subsystem: the capability trait every cartridge board implements,
shared graphics/nametable storage, and the NROM (mapper 0) board.

Address ranges seen by a mapper:
- Program space: CPU $6000..=$FFFF (PRG RAM window + PRG ROM / board registers).
- Graphics space: PPU $0000..=$3EFF (pattern tables + nametables). Palette
  memory ($3F00..=$3FFF) lives inside the PPU and never reaches the mapper.

Both the Bus and the PPU hold a `SharedMapper` handle to the same board. They
are driven strictly one after the other by the console, so `RefCell` borrows
never overlap.
*/

use std::cell::RefCell;
use std::rc::Rc;

/// Value returned for reads that hit nothing (no cartridge, disabled RAM).
pub const OPEN_BUS: u8 = 0xFF;

pub const PRG_BANK_16K: usize = 16 * 1024;
pub const CHR_BANK_4K: usize = 4 * 1024;
pub const CHR_SIZE_8K: usize = 8 * 1024;
pub const PRG_RAM_SIZE: usize = 8 * 1024;

/// Nametable arrangement. Fixed by the header for NROM; switchable on MMC1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapperMirroring {
    SingleScreenLower,
    SingleScreenUpper,
    Vertical,
    Horizontal,
}

pub trait Mapper {
    /// iNES mapper number (0 = NROM, 1 = MMC1).
    fn mapper_id(&self) -> u16;

    /// CPU read at $6000..=$FFFF.
    fn read_program(&self, addr: u16) -> u8;

    /// CPU write at $6000..=$FFFF (PRG RAM or board registers).
    fn write_program(&mut self, addr: u16, value: u8);

    /// PPU read at $0000..=$3EFF.
    fn read_graphics(&self, addr: u16) -> u8;

    /// PPU write at $0000..=$3EFF. Writes to CHR ROM are dropped.
    fn write_graphics(&mut self, addr: u16, value: u8);

    /// Mirroring currently in effect.
    fn mirroring(&self) -> MapperMirroring;

    /// Power-on state for board registers.
    fn reset(&mut self) {}
}

pub type SharedMapper = Rc<RefCell<dyn Mapper>>;

/// Pattern memory: either the cartridge's CHR ROM or a writable 8 KiB CHR RAM.
#[derive(Clone, Debug)]
pub enum ChrMemory {
    Rom(Vec<u8>),
    Ram(Vec<u8>),
}

impl ChrMemory {
    /// CHR ROM when `chr` has data, otherwise a zeroed 8 KiB CHR RAM.
    pub fn from_image(chr: Vec<u8>) -> Self {
        if chr.is_empty() {
            ChrMemory::Ram(vec![0; CHR_SIZE_8K])
        } else {
            ChrMemory::Rom(chr)
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    pub fn is_ram(&self) -> bool {
        matches!(self, ChrMemory::Ram(_))
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            ChrMemory::Rom(b) | ChrMemory::Ram(b) => b,
        }
    }

    /// Read an absolute offset into CHR storage (wrapped to its size).
    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        let bytes = self.bytes();
        if bytes.is_empty() {
            return 0;
        }
        bytes[offset % bytes.len()]
    }

    #[inline]
    pub fn write(&mut self, offset: usize, value: u8) {
        if let ChrMemory::Ram(bytes) = self {
            if bytes.is_empty() {
                return;
            }
            let idx = offset % bytes.len();
            bytes[idx] = value;
        }
    }
}

/// 2 KiB of nametable RAM, split into two physical 1 KiB pages.
#[derive(Clone)]
pub struct Nametables {
    ram: [u8; 0x800],
}

impl Default for Nametables {
    fn default() -> Self {
        Self { ram: [0; 0x800] }
    }
}

impl std::fmt::Debug for Nametables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nametables").finish_non_exhaustive()
    }
}

impl Nametables {
    /// Resolve a $2000..=$3EFF address to an offset into the 2 KiB backing store.
    #[inline]
    pub fn index(addr: u16, mirroring: MapperMirroring) -> usize {
        let rel = (addr.wrapping_sub(0x2000) & 0x0FFF) as usize;
        let table = rel / 0x400;
        let page = match mirroring {
            MapperMirroring::SingleScreenLower => 0,
            MapperMirroring::SingleScreenUpper => 1,
            MapperMirroring::Vertical => table & 1,
            MapperMirroring::Horizontal => table >> 1,
        };
        page * 0x400 + (rel & 0x3FF)
    }

    #[inline]
    pub fn read(&self, addr: u16, mirroring: MapperMirroring) -> u8 {
        self.ram[Self::index(addr, mirroring)]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, mirroring: MapperMirroring, value: u8) {
        self.ram[Self::index(addr, mirroring)] = value;
    }
}

/// NROM (mapper 0).
///
/// - PRG ROM: 16 KiB mirrored across $8000..=$FFFF, or 32 KiB direct.
/// - PRG RAM: 8 KiB at $6000..=$7FFF.
/// - CHR: 8 KiB ROM, or RAM when the image carries none.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: ChrMemory,
    nametables: Nametables,
    mirroring: MapperMirroring,
}

impl Nrom {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, mirroring: MapperMirroring) -> Self {
        Self {
            prg_rom,
            prg_ram: vec![0; PRG_RAM_SIZE],
            chr: ChrMemory::from_image(chr),
            nametables: Nametables::default(),
            mirroring,
        }
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr.is_ram()
    }

    #[inline]
    fn prg_rom_read(&self, addr: u16) -> u8 {
        if self.prg_rom.is_empty() {
            return OPEN_BUS;
        }
        // 16 KiB images repeat in the upper half.
        let rel = (addr as usize) & 0x7FFF;
        self.prg_rom[rel % self.prg_rom.len()]
    }
}

impl Mapper for Nrom {
    #[inline]
    fn mapper_id(&self) -> u16 {
        0
    }

    fn read_program(&self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE],
            0x8000..=0xFFFF => self.prg_rom_read(addr),
            _ => OPEN_BUS,
        }
    }

    fn write_program(&mut self, addr: u16, value: u8) {
        if let 0x6000..=0x7FFF = addr {
            self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE] = value;
        }
        // $8000..=$FFFF has no registers on this board.
    }

    fn read_graphics(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if addr < 0x2000 {
            self.chr.read(addr as usize)
        } else {
            self.nametables.read(addr, self.mirroring)
        }
    }

    fn write_graphics(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        if addr < 0x2000 {
            self.chr.write(addr as usize, value);
        } else {
            self.nametables.write(addr, self.mirroring, value);
        }
    }

    fn mirroring(&self) -> MapperMirroring {
        self.mirroring
    }
}
