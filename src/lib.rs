#![doc = r#"
nesdot library crate.

Cycle-stepped NES core: a 2A03 CPU, a dot-exact PPU, NROM and MMC1
cartridges, and the console that keeps the two clocks at 1:3.

Modules:
- bus: CPU address space (RAM, PPU registers, OAM DMA, controllers, cartridge)
- cartridge: iNES v1 loader; constructs a Mapper
- console: clock coordinator and NMI edge detection
- controller: standard pad shift register
- cpu: 6502 CPU core (facade + state + table + dispatch + execute modules)
- error: cartridge load errors
- mapper: Mapper trait, nametable mirroring and NROM (mapper 0)
- mappers: MMC1 (mapper 1)
- ppu: registers, background/sprite pipeline and framebuffer
- screenshot: PNG dumps of the framebuffer (feature `screenshot`)

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod console;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod mappers;
pub mod ppu;
#[cfg(feature = "screenshot")]
pub mod screenshot;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use console::Console;
pub use cpu::Cpu;
pub use error::CartridgeError;

#[cfg(test)]
pub mod test_utils;
