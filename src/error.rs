//! Error types surfaced at the cartridge-loading edge.
//!
//! Runtime conditions (illegal opcodes, missing cartridge) are soft state
//! flags and sentinel values; only image parsing returns `Err`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("image too small for an iNES header ({0} bytes)")]
    HeaderTooShort(usize),

    #[error("invalid iNES magic, expected NES<EOF>")]
    BadMagic,

    #[error("image declares no PRG ROM banks")]
    NoPrgRom,

    #[error("truncated image: {section} needs {expected} bytes, only {available} present")]
    Truncated {
        section: &'static str,
        expected: usize,
        available: usize,
    },

    #[error("unsupported mapper id {0}")]
    UnsupportedMapper(u16),

    #[error("failed to read cartridge file: {0}")]
    Io(String),
}
