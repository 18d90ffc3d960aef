/*!
state.rs - 6502 architectural state.

`CpuState` owns the registers, the status byte and the soft fault latch.
Instruction semantics are written against the `CpuRegs` trait (see
`regs.rs`); this type is the one implementation the emulator runs.

Status flag bits (bit 7 .. bit 0): N V U B D I Z C. `U` reads back as 1;
`B` only exists in copies of the status pushed to the stack.

Stack
=====
The stack lives at $0100-$01FF. A push writes at `0x0100 | sp` and then
decrements `sp`; a pop increments first. Both wrap within page 1 (see
`execute::push` / `execute::pop`).
*/

use std::fmt;

use crate::bus::Bus;

pub const CARRY: u8 = 0x01;
pub const ZERO: u8 = 0x02;
pub const IRQ_DISABLE: u8 = 0x04;
pub const DECIMAL: u8 = 0x08;
pub const BREAK: u8 = 0x10;
pub const UNUSED: u8 = 0x20;
pub const OVERFLOW: u8 = 0x40;
pub const NEGATIVE: u8 = 0x80;

pub const STACK_PAGE: u16 = 0x0100;
pub const POWER_ON_SP: u8 = 0xFD;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Recorded when the CPU fetches an opcode it does not implement.
///
/// Execution continues after the fault; the host decides whether to stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CpuFault {
    pub opcode: u8,
    /// Address the opcode was fetched from.
    pub pc: u16,
}

impl fmt::Display for CpuFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal opcode ${:02X} at ${:04X}", self.opcode, self.pc)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuState {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) sp: u8,
    pub(crate) pc: u16,
    pub(crate) status: u8,
    pub(crate) fault: Option<CpuFault>,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_ON_SP,
            pc: 0,
            status: IRQ_DISABLE | UNUSED,
            fault: None,
        }
    }
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers to their power-on values and PC from the reset vector.
    pub fn reset(&mut self, bus: &mut Bus) {
        *self = Self::default();
        self.pc = bus.read_word(RESET_VECTOR);
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }
    #[inline]
    pub fn fault(&self) -> Option<CpuFault> {
        self.fault
    }
}
