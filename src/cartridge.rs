/*!
Cartridge: iNES (v1) image parsing and mapper construction.

Layout handled:
- 16-byte header: magic `NES\x1A`, PRG size (16 KiB units), CHR size
  (8 KiB units, 0 => CHR RAM), flags 6 (mirroring, battery, trainer,
  four-screen, mapper low nibble), flags 7 (mapper high nibble).
- Optional 512-byte trainer (skipped).
- PRG ROM, then CHR ROM.

The loader owns the board; `Cartridge::mapper()` hands out shared handles
for the Bus and the PPU.
*/

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{info, warn};

use crate::error::CartridgeError;
use crate::mapper::{CHR_SIZE_8K, MapperMirroring, Nrom, PRG_BANK_16K, SharedMapper};
use crate::mappers::Mmc1;

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const INES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Parsed iNES header fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InesHeader {
    pub prg_banks: usize,
    pub chr_banks: usize,
    pub mapper_id: u16,
    pub mirroring: MapperMirroring,
    pub battery: bool,
    pub has_trainer: bool,
    pub four_screen: bool,
}

impl InesHeader {
    pub fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::HeaderTooShort(data.len()));
        }
        if &data[0..4] != INES_MAGIC {
            return Err(CartridgeError::BadMagic);
        }
        let flags6 = data[6];
        let flags7 = data[7];
        Ok(Self {
            prg_banks: data[4] as usize,
            chr_banks: data[5] as usize,
            mapper_id: ((flags7 & 0xF0) | (flags6 >> 4)) as u16,
            mirroring: if flags6 & 0x01 != 0 {
                MapperMirroring::Vertical
            } else {
                MapperMirroring::Horizontal
            },
            battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
            four_screen: flags6 & 0x08 != 0,
        })
    }
}

pub struct Cartridge {
    mapper: SharedMapper,
    header: InesHeader,
    prg_rom_len: usize,
    chr_is_ram: bool,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .field("prg_rom_len", &self.prg_rom_len)
            .field("chr_is_ram", &self.chr_is_ram)
            .finish()
    }
}

impl Cartridge {
    /// Parse an iNES image and build its mapper.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = InesHeader::parse(data)?;
        if header.prg_banks == 0 {
            return Err(CartridgeError::NoPrgRom);
        }

        let mut offset = HEADER_LEN;
        if header.has_trainer {
            offset += TRAINER_LEN;
        }

        let prg = take_section(data, offset, header.prg_banks * PRG_BANK_16K, "PRG ROM")?;
        offset += prg.len();
        let chr = take_section(data, offset, header.chr_banks * CHR_SIZE_8K, "CHR ROM")?;

        if header.four_screen {
            warn!("four-screen nametables not supported; using the header mirroring bit");
        }

        let prg_rom_len = prg.len();
        let chr_is_ram = chr.is_empty();
        let mapper: SharedMapper = match header.mapper_id {
            0 => Rc::new(RefCell::new(Nrom::new(prg, chr, header.mirroring))),
            1 => Rc::new(RefCell::new(Mmc1::new(prg, chr))),
            id => return Err(CartridgeError::UnsupportedMapper(id)),
        };

        info!(
            "loaded cartridge: mapper {} PRG {} KiB CHR {} mirroring {:?}",
            header.mapper_id,
            prg_rom_len / 1024,
            if chr_is_ram {
                "RAM 8 KiB".to_string()
            } else {
                format!("ROM {} KiB", header.chr_banks * 8)
            },
            header.mirroring
        );

        Ok(Self {
            mapper,
            header,
            prg_rom_len,
            chr_is_ram,
        })
    }

    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path.as_ref()).map_err(|e| {
            CartridgeError::Io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_ines_bytes(&data)
    }

    /// Shared handle to the board for the Bus / PPU.
    pub fn mapper(&self) -> SharedMapper {
        Rc::clone(&self.mapper)
    }

    pub fn header(&self) -> &InesHeader {
        &self.header
    }

    pub fn mapper_id(&self) -> u16 {
        self.header.mapper_id
    }

    pub fn mirroring(&self) -> MapperMirroring {
        self.header.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.header.battery
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom_len
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }
}

fn take_section(
    data: &[u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<Vec<u8>, CartridgeError> {
    let available = data.len().saturating_sub(offset);
    if available < len {
        return Err(CartridgeError::Truncated {
            section,
            expected: len,
            available,
        });
    }
    Ok(data[offset..offset + len].to_vec())
}
