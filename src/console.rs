/*!
Console: clock coordinator for the CPU and the PPU.

The two clock domains are locked at 1:3. After each CPU instruction the PPU
is ticked three times per CPU cycle the instruction reported (OAM DMA stall
included). The PPU's NMI line is sampled after every single dot; a 0 -> 1
transition makes the console enter the NMI handler once the batch finishes,
and the 7 cycles of interrupt entry are paid with 21 more dots.

Inserting a cartridge power-cycles the console so the CPU starts at the
cartridge's reset vector.
*/

use std::path::Path;

use log::trace;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::cpu::{Cpu, CpuFault};
use crate::error::CartridgeError;

pub const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

pub struct Console {
    pub cpu: Cpu,
    pub bus: Bus,
    cartridge: Option<Cartridge>,
    // Level of the PPU NMI line after the last dot.
    nmi_line: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: Bus::new(),
            cartridge: None,
            nmi_line: false,
        }
    }

    pub fn with_cartridge(cart: Cartridge) -> Self {
        let mut console = Self::new();
        console.insert_cartridge(cart);
        console
    }

    /// Reset the bus (PPU and mapper registers) and then the CPU.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.nmi_line = false;
    }

    /// Attach the cartridge to the bus and PPU, then reset.
    pub fn insert_cartridge(&mut self, cart: Cartridge) {
        self.bus.attach_cartridge(&cart);
        self.cartridge = Some(cart);
        self.reset();
    }

    /// Parse an iNES image and insert it. On error the previous cartridge
    /// is ejected: nothing stays attached and cartridge space reads open bus.
    pub fn load_ines(&mut self, data: &[u8]) -> Result<(), CartridgeError> {
        let cart = Cartridge::from_ines_bytes(data).inspect_err(|_| self.eject())?;
        self.insert_cartridge(cart);
        Ok(())
    }

    pub fn load_ines_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CartridgeError> {
        let cart = Cartridge::from_ines_file(path).inspect_err(|_| self.eject())?;
        self.insert_cartridge(cart);
        Ok(())
    }

    /// Detach any cartridge and reset.
    pub fn eject(&mut self) {
        self.bus.detach_cartridge();
        self.cartridge = None;
        self.reset();
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    /// One instruction, its PPU dots and any NMI it triggered. Returns the
    /// CPU cycles consumed, interrupt entry included.
    pub fn step(&mut self) -> u32 {
        let mut cycles = self.cpu.step(&mut self.bus);
        let mut nmi = self.tick_ppu(cycles);
        while nmi {
            trace!(
                "nmi at scanline {} dot {}",
                self.bus.ppu.scanline(),
                self.bus.ppu.dot()
            );
            let entry = self.cpu.nmi(&mut self.bus);
            cycles += entry;
            nmi = self.tick_ppu(entry);
        }
        cycles
    }

    /// Step until the PPU finishes the current frame. Returns CPU cycles run.
    pub fn run_frame(&mut self) -> u64 {
        let _ = self.bus.ppu.take_frame_complete();
        let mut cycles = 0u64;
        loop {
            cycles += self.step() as u64;
            if self.bus.ppu.take_frame_complete() {
                break;
            }
        }
        cycles
    }

    /// ARGB8888, 256x240, row-major.
    pub fn framebuffer(&self) -> &[u32] {
        self.bus.ppu.framebuffer()
    }

    pub fn fault(&self) -> Option<CpuFault> {
        self.cpu.fault()
    }

    pub fn controller_mut(&mut self, port: usize) -> Option<&mut Controller> {
        self.bus.controller_mut(port)
    }

    // True if the NMI line rose during the batch.
    fn tick_ppu(&mut self, cpu_cycles: u32) -> bool {
        let mut rose = false;
        for _ in 0..cpu_cycles * PPU_DOTS_PER_CPU_CYCLE {
            self.bus.ppu.tick();
            let line = self.bus.ppu.nmi_line();
            rose |= line && !self.nmi_line;
            self.nmi_line = line;
        }
        rose
    }
}
