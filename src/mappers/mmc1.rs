//! MMC1 (Mapper 1).
//!
//! Registers are loaded through a 5-bit serial port: each write to
//! $8000..=$FFFF shifts bit 0 of the value in at bit 4 while the register
//! shifts right. The idle value 0x10 acts as a sentinel; when that marker bit
//! reaches bit 0 the next write completes the sequence and the assembled value
//! commits to the register selected by address bits 14..13:
//!
//! | range         | register                                    |
//! |---------------|---------------------------------------------|
//! | $8000..=$9FFF | control (mirroring, PRG mode, CHR mode)     |
//! | $A000..=$BFFF | CHR bank 0                                  |
//! | $C000..=$DFFF | CHR bank 1                                  |
//! | $E000..=$FFFF | PRG bank (bits 0..3) + PRG RAM disable (4)  |
//!
//! A write with bit 7 set aborts any pending sequence and forces PRG mode 3.
//! Every bank index is reduced modulo the number of banks actually present.

use log::debug;

use crate::mapper::{
    CHR_BANK_4K, ChrMemory, Mapper, MapperMirroring, Nametables, OPEN_BUS, PRG_BANK_16K,
    PRG_RAM_SIZE,
};

const SHIFT_IDLE: u8 = 0x10;
const CONTROL_POWER_ON: u8 = 0x0C;

#[derive(Debug, Clone)]
pub struct Mmc1 {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: ChrMemory,
    nametables: Nametables,

    control: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_bank: u8,
    prg_ram_enabled: bool,

    shift: u8,

    prg_bank_count: usize,
    chr_bank_count: usize,

    // Resolved 16 KiB PRG banks for $8000 and $C000, and 4 KiB CHR banks for
    // $0000 and $1000.
    prg_banks: [usize; 2],
    chr_banks: [usize; 2],
}

impl Mmc1 {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>) -> Self {
        let chr = ChrMemory::from_image(chr);
        let prg_bank_count = (prg_rom.len() / PRG_BANK_16K).max(1);
        let chr_bank_count = (chr.len() / CHR_BANK_4K).max(1);
        let mut m = Self {
            prg_rom,
            prg_ram: vec![0; PRG_RAM_SIZE],
            chr,
            nametables: Nametables::default(),
            control: CONTROL_POWER_ON,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_bank: 0,
            prg_ram_enabled: true,
            shift: SHIFT_IDLE,
            prg_bank_count,
            chr_bank_count,
            prg_banks: [0, 0],
            chr_banks: [0, 0],
        };
        m.update_banks();
        m
    }

    #[inline]
    fn prg_mode(&self) -> u8 {
        (self.control >> 2) & 0x03
    }

    #[inline]
    fn chr_4k_mode(&self) -> bool {
        self.control & 0x10 != 0
    }

    fn update_banks(&mut self) {
        let prg_n = self.prg_bank_count;
        let bank = (self.prg_bank & 0x0F) as usize;
        self.prg_banks = match self.prg_mode() {
            0 | 1 => {
                let base = bank & !1;
                [base % prg_n, (base + 1) % prg_n]
            }
            2 => [0, bank % prg_n],
            _ => [bank % prg_n, prg_n - 1],
        };

        let chr_n = self.chr_bank_count;
        self.chr_banks = if self.chr_4k_mode() {
            [self.chr_bank0 as usize % chr_n, self.chr_bank1 as usize % chr_n]
        } else {
            let base = (self.chr_bank0 & 0x1E) as usize;
            [base % chr_n, (base + 1) % chr_n]
        };
    }

    fn commit(&mut self, addr: u16, value: u8) {
        let value = value & 0x1F;
        match (addr >> 13) & 0x03 {
            0 => self.control = value,
            1 => self.chr_bank0 = value,
            2 => self.chr_bank1 = value,
            _ => {
                self.prg_bank = value & 0x0F;
                self.prg_ram_enabled = value & 0x10 == 0;
            }
        }
        self.update_banks();
        debug!(
            "mmc1 commit ${:04X} <- {:05b}: prg={:?} chr={:?} mirroring={:?}",
            addr,
            value,
            self.prg_banks,
            self.chr_banks,
            self.mirroring()
        );
    }

    fn serial_write(&mut self, addr: u16, value: u8) {
        if value & 0x80 != 0 {
            self.shift = SHIFT_IDLE;
            self.control |= CONTROL_POWER_ON;
            self.update_banks();
            return;
        }
        let complete = self.shift & 1 != 0;
        self.shift = (self.shift >> 1) | ((value & 1) << 4);
        if complete {
            let assembled = self.shift;
            self.shift = SHIFT_IDLE;
            self.commit(addr, assembled);
        }
    }

    #[inline]
    fn chr_offset(&self, addr: u16) -> usize {
        let slot = ((addr >> 12) & 1) as usize;
        self.chr_banks[slot] * CHR_BANK_4K + (addr as usize & 0x0FFF)
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn chr_bank0(&self) -> u8 {
        self.chr_bank0
    }

    pub fn chr_bank1(&self) -> u8 {
        self.chr_bank1
    }

    pub fn prg_bank(&self) -> u8 {
        self.prg_bank
    }

    pub fn prg_ram_enabled(&self) -> bool {
        self.prg_ram_enabled
    }
}

impl Mapper for Mmc1 {
    fn mapper_id(&self) -> u16 {
        1
    }

    fn read_program(&self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => {
                if self.prg_ram_enabled {
                    self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE]
                } else {
                    OPEN_BUS
                }
            }
            0x8000..=0xFFFF => {
                if self.prg_rom.is_empty() {
                    return OPEN_BUS;
                }
                let slot = ((addr >> 14) & 1) as usize;
                let offset = self.prg_banks[slot] * PRG_BANK_16K + (addr as usize & 0x3FFF);
                self.prg_rom[offset % self.prg_rom.len()]
            }
            _ => OPEN_BUS,
        }
    }

    fn write_program(&mut self, addr: u16, value: u8) {
        match addr {
            0x6000..=0x7FFF => {
                if self.prg_ram_enabled {
                    self.prg_ram[(addr as usize - 0x6000) % PRG_RAM_SIZE] = value;
                }
            }
            0x8000..=0xFFFF => self.serial_write(addr, value),
            _ => {}
        }
    }

    fn read_graphics(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if addr < 0x2000 {
            self.chr.read(self.chr_offset(addr))
        } else {
            self.nametables.read(addr, self.mirroring())
        }
    }

    fn write_graphics(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        if addr < 0x2000 {
            let offset = self.chr_offset(addr);
            self.chr.write(offset, value);
        } else {
            let mirroring = self.mirroring();
            self.nametables.write(addr, mirroring, value);
        }
    }

    fn mirroring(&self) -> MapperMirroring {
        match self.control & 0x03 {
            0 => MapperMirroring::SingleScreenLower,
            1 => MapperMirroring::SingleScreenUpper,
            2 => MapperMirroring::Vertical,
            _ => MapperMirroring::Horizontal,
        }
    }

    fn reset(&mut self) {
        self.shift = SHIFT_IDLE;
        self.control = CONTROL_POWER_ON;
        self.chr_bank0 = 0;
        self.chr_bank1 = 0;
        self.prg_bank = 0;
        self.prg_ram_enabled = true;
        self.update_banks();
    }
}
