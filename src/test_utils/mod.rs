//! Shared test fixtures: iNES image builders and a ready-to-step CPU + Bus.
//!
//! Header fields written by the builders:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units (0 => CHR RAM)
//! - byte 6 = flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = flags 7 (mapper high nibble)
//! - byte 8 = PRG RAM size in 8 KiB units (informational only)
//!
//! Vectors always sit in the last six bytes of PRG, which is where both
//! NROM layouts and MMC1's power-on fixed bank expose them at $FFFA.

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::core::Cpu;

const PRG_16K: usize = 16 * 1024;
const CHR_8K: usize = 8 * 1024;

/// Build an iNES image; PRG is filled with 0xAA and CHR with 0xCC.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map_or(0, |_| 512) + prg_16k * PRG_16K + chr_8k * CHR_8K,
    );
    bytes.extend_from_slice(b"NES\x1A");
    bytes.extend_from_slice(&[prg_16k as u8, chr_8k as u8, flags6, flags7, prg_ram_8k]);
    bytes.extend_from_slice(&[0u8; 7]);
    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.resize(bytes.len() + prg_16k * PRG_16K, 0xAA);
    bytes.resize(bytes.len() + chr_8k * CHR_8K, 0xCC);
    bytes
}

/// NROM-128 image with `prg` placed at $8000 and the given (reset, nmi, irq)
/// vectors (all default to $8000).
pub fn build_nrom_with_prg(
    prg: &[u8],
    chr_8k: usize,
    prg_ram_8k: u8,
    vectors: Option<(u16, u16, u16)>,
) -> Vec<u8> {
    assert!(prg.len() <= PRG_16K - 6, "program must leave room for vectors");
    let mut rom = build_ines(1, chr_8k, 0, 0, prg_ram_8k, None);
    let prg_area = &mut rom[16..16 + PRG_16K];
    prg_area[..prg.len()].copy_from_slice(prg);
    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(prg_area, reset, nmi, irq);
    rom
}

/// MMC1 image with `prg_16k` banks; every byte of bank `n` is `n` except the
/// vector table at the end of the last bank (reset/nmi/irq = $C000).
pub fn build_mmc1(prg_16k: usize, chr_8k: usize) -> Vec<u8> {
    let mut rom = build_ines(prg_16k, chr_8k, 0x10, 0x00, 1, None);
    for bank in 0..prg_16k {
        let start = 16 + bank * PRG_16K;
        rom[start..start + PRG_16K].fill(bank as u8);
    }
    let prg_area = &mut rom[16..16 + prg_16k * PRG_16K];
    set_vectors_in_prg(prg_area, 0xC000, 0xC000, 0xC000);
    rom
}

/// Write NMI / RESET / IRQ vectors into the last six bytes of a PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    assert!(prg.len() >= 6, "PRG slice too small for a vector table");
    let base = prg.len() - 6;
    for (i, v) in [nmi, reset, irq].into_iter().enumerate() {
        prg[base + i * 2..base + i * 2 + 2].copy_from_slice(&v.to_le_bytes());
    }
}

/// Bus with an NROM cartridge holding `prg` at $8000 (CHR RAM).
pub fn bus_with_program(prg: &[u8], vectors: Option<(u16, u16, u16)>) -> Bus {
    let rom = build_nrom_with_prg(prg, 0, 1, vectors);
    let cart = Cartridge::from_ines_bytes(&rom).expect("fixture image is valid");
    let mut bus = Bus::new();
    bus.attach_cartridge(&cart);
    bus
}

/// CPU reset onto `prg` at $8000.
pub fn cpu_with_program(prg: &[u8]) -> (Cpu, Bus) {
    let mut bus = bus_with_program(prg, None);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(&rom[4..9], &[2, 1, 0x01, 0x00, 1]);
        assert_eq!(rom.len(), 16 + 2 * PRG_16K + CHR_8K);
    }

    #[test]
    fn vectors_land_at_end_of_prg() {
        let mut prg = vec![0u8; 32 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x7FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn cpu_fixture_starts_at_program() {
        let (cpu, mut bus) = cpu_with_program(&[0xA9, 0x01]);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(bus.read(0x8000), 0xA9);
    }
}
