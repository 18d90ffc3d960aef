/*!
Bus: CPU address decoding.

Address map (CPU):
- $0000-$1FFF: 2 KiB internal RAM, mirrored every $0800
- $2000-$3FFF: PPU registers, mirrored every 8 bytes
- $4014: OAM DMA trigger (see `dma.rs`)
- $4016: controller strobe (write) / controller 1 serial read
- $4017: controller 2 serial read
- $4000-$401F (others): unmodelled APU / test I/O, read 0, writes ignored
- $4020-$5FFF: open bus
- $6000-$7FFF: cartridge PRG RAM
- $8000-$FFFF: cartridge PRG ROM / mapper registers

With no cartridge attached, $6000-$FFFF reads return `OPEN_BUS` and writes
are dropped.

The Bus also keeps the running CPU cycle total; the CPU adds every
instruction's cost through `add_cycles`.
*/

mod dma;

use log::debug;

use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::mapper::{OPEN_BUS, SharedMapper};
use crate::ppu::Ppu;

pub struct Bus {
    ram: [u8; 0x0800],

    pub ppu: Ppu,
    pub controllers: [Controller; 2],

    mapper: Option<SharedMapper>,

    cpu_cycles: u64,
    // CPU cycles owed to an OAM DMA started by the current instruction.
    dma_stall: u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            ram: [0; 0x0800],
            ppu: Ppu::new(),
            controllers: [Controller::new(), Controller::new()],
            mapper: None,
            cpu_cycles: 0,
            dma_stall: 0,
        }
    }

    /// Reset PPU and mapper registers; RAM contents survive like on hardware.
    pub fn reset(&mut self) {
        self.ppu.reset();
        if let Some(m) = &self.mapper {
            m.borrow_mut().reset();
        }
        self.dma_stall = 0;
    }

    /// Wire the cartridge's board into CPU space and the PPU.
    pub fn attach_cartridge(&mut self, cart: &Cartridge) {
        self.mapper = Some(cart.mapper());
        self.ppu.attach_mapper(cart.mapper());
        debug!("bus: attached mapper {}", cart.mapper_id());
    }

    pub fn detach_cartridge(&mut self) {
        self.mapper = None;
        self.ppu.detach_mapper();
    }

    pub fn has_cartridge(&self) -> bool {
        self.mapper.is_some()
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.read_register(addr),
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            0x4000..=0x401F => 0,
            0x4020..=0x5FFF => OPEN_BUS,
            0x6000..=0xFFFF => match &self.mapper {
                Some(m) => m.borrow().read_program(addr),
                None => OPEN_BUS,
            },
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => self.ppu.write_register(addr, value),
            0x4014 => self.run_oam_dma(value),
            0x4016 => {
                for c in &mut self.controllers {
                    c.write_strobe(value);
                }
            }
            0x4000..=0x5FFF => {}
            0x6000..=0xFFFF => {
                if let Some(m) = &self.mapper {
                    m.borrow_mut().write_program(addr, value);
                }
            }
        }
    }

    /// Little-endian word read (two separate bus reads).
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn add_cycles(&mut self, cycles: u32) {
        self.cpu_cycles += cycles as u64;
    }

    /// CPU cycles executed since power-on.
    pub fn cpu_cycles(&self) -> u64 {
        self.cpu_cycles
    }

    pub fn controller_mut(&mut self, port: usize) -> Option<&mut Controller> {
        self.controllers.get_mut(port)
    }
}
