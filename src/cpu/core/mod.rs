/*!
core::Cpu - The 6502 as the rest of the emulator sees it.

`Cpu` owns a `CpuState` and forwards to the dispatcher. Every entry point
that consumes time (`step`, `nmi`, `irq`) returns the CPU cycles it took
and has already added them to the bus cycle counter.

NMI edge detection is not done here: the console watches the PPU's NMI
line and calls `nmi` once per rising edge.
*/

use crate::bus::Bus;
use crate::cpu::dispatch;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CpuFault, CpuState};

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    state: CpuState,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
        }
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Power-on register values, PC from $FFFC, fault cleared.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.state.reset(bus);
    }

    /// Execute one instruction.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        dispatch::step(&mut self.state, bus)
    }

    /// Take a non-maskable interrupt (7 cycles).
    pub fn nmi(&mut self, bus: &mut Bus) -> u32 {
        dispatch::nmi(&mut self.state, bus)
    }

    /// Take a maskable interrupt if I is clear; 0 cycles otherwise.
    pub fn irq(&mut self, bus: &mut Bus) -> u32 {
        dispatch::irq(&mut self.state, bus)
    }

    /// First illegal opcode hit since the last reset.
    pub fn fault(&self) -> Option<CpuFault> {
        self.state.fault()
    }

    pub fn a(&self) -> u8 {
        self.state.a()
    }
    pub fn x(&self) -> u8 {
        self.state.x()
    }
    pub fn y(&self) -> u8 {
        self.state.y()
    }
    pub fn sp(&self) -> u8 {
        self.state.sp()
    }
    pub fn pc(&self) -> u16 {
        self.state.pc()
    }
    pub fn status(&self) -> u8 {
        self.state.status()
    }

    pub fn flag(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.state.set_pc(pc);
    }
}
