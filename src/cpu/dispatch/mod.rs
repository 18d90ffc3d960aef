/*!
dispatch - Executes one 6502 instruction or interrupt entry.

Step
====
1. Fetch the opcode at PC and look it up in `table::OPCODES`.
2. Seed the cycle counter with the entry's base cost.
3. Offer the entry to each family handler in turn. A handler that owns the
   instruction resolves its operand, runs the semantics, adds any dynamic
   cycles (page cross, taken branch) and returns true.
4. Nobody claims it: the opcode is illegal (see `finalize::illegal`).
5. `finalize::finish` folds in the OAM DMA stall and commits the total to
   the bus cycle counter.

Handlers never commit cycles themselves.
*/

use log::trace;

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, fetch_byte};
use crate::cpu::execute::{enter_interrupt, get_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{IRQ_DISABLE, IRQ_VECTOR, NMI_VECTOR};
use crate::cpu::table;

mod arithmetic;
mod branches;
mod compare;
mod control_flow;
mod finalize;
mod load_store;
mod logical;
mod misc;
mod rmw;
mod undocumented;

pub(crate) const INTERRUPT_CYCLES: u32 = 7;

/// Execute one instruction; returns the CPU cycles it took, DMA stall included.
pub(crate) fn step<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u32 {
    let pc = cpu.pc();
    let opcode = fetch_byte(cpu, bus);
    let op = table::lookup(opcode);
    trace!("{:04X}  {:02X}  {:?} {:?}", pc, opcode, op.instr, op.mode);

    let mut cycles = op.cycles as u32;
    let handled = load_store::handle(op, cpu, bus, &mut cycles)
        || logical::handle(op, cpu, bus, &mut cycles)
        || arithmetic::handle(op, cpu, bus, &mut cycles)
        || compare::handle(op, cpu, bus, &mut cycles)
        || branches::handle(op, cpu, bus, &mut cycles)
        || rmw::handle(op, cpu, bus, &mut cycles)
        || control_flow::handle(op, cpu, bus, &mut cycles)
        || misc::handle(op, cpu, bus, &mut cycles)
        || undocumented::handle(op, cpu, bus, &mut cycles);

    if !handled {
        finalize::illegal(cpu, opcode, pc);
    }
    finalize::finish(bus, cycles)
}

/// NMI entry. Always taken.
pub(crate) fn nmi<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u32 {
    let pc = cpu.pc();
    enter_interrupt(cpu, bus, pc, NMI_VECTOR, false);
    finalize::finish(bus, INTERRUPT_CYCLES)
}

/// IRQ entry; returns 0 without effect while I is set.
pub(crate) fn irq<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u32 {
    if get_flag(cpu, IRQ_DISABLE) {
        return 0;
    }
    let pc = cpu.pc();
    enter_interrupt(cpu, bus, pc, IRQ_VECTOR, false);
    finalize::finish(bus, INTERRUPT_CYCLES)
}

/// +1 for an indexed read that crossed a page. Stores and RMW never pay it.
#[inline]
pub(super) fn add_page_cross_penalty(cycles: &mut u32, operand: Operand) {
    if operand.page_crossed {
        *cycles += 1;
    }
}
