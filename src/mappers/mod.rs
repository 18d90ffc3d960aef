/*
Module: mappers

Declares the bank-switching boards beyond NROM (which lives next to the
`Mapper` trait in `crate::mapper`) and re-exports their public types.

Implemented:
- MMC1 (Mapper 1)
*/

pub mod mmc1;

pub use mmc1::Mmc1;
