/*!
regs.rs - `CpuRegs`, the register and flag interface instruction code is
written against.

The trait carries no bus access. Fetches, stack traffic and operand reads
stay explicit at call sites through `&mut Bus`, so handlers borrow the CPU
and the bus independently.

Handlers are generic (`fn op<C: CpuRegs>(cpu: &mut C, ..)`) and resolve
statically; `CpuState` is the implementation the console runs.
*/

use crate::cpu::state::{
    BREAK, CARRY, CpuFault, CpuState, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};

pub trait CpuRegs {
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> u8;

    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    fn set_status(&mut self, v: u8);

    /// Latch a soft fault. The first fault since reset is kept.
    fn raise_fault(&mut self, fault: CpuFault);

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        let pc = self.pc().wrapping_add(delta);
        self.set_pc(pc);
    }

    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        self.status() & mask != 0
    }

    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        let s = if value {
            self.status() | mask
        } else {
            self.status() & !mask
        };
        self.set_status(s);
    }

    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, result & 0x80 != 0);
    }

    #[inline]
    fn update_carry(&mut self, carry: bool) {
        self.assign_flag(CARRY, carry);
    }

    #[inline]
    fn update_overflow(&mut self, overflow: bool) {
        self.assign_flag(OVERFLOW, overflow);
    }

    /// Status byte as pushed to the stack: U always set, B only for
    /// PHP/BRK.
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let v = self.status() | UNUSED;
        if set_break { v | BREAK } else { v & !BREAK }
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        // B has no storage in the live register; U is hardwired.
        self.status = (v & !BREAK) | UNUSED;
    }

    fn raise_fault(&mut self, fault: CpuFault) {
        if self.fault.is_none() {
            self.fault = Some(fault);
        }
    }
}
