//! CMP / CPX / CPY.

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::compare;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    let reg = match op.instr {
        Instr::Cmp => cpu.a(),
        Instr::Cpx => cpu.x(),
        Instr::Cpy => cpu.y(),
        _ => return false,
    };
    let operand = resolve(cpu, bus, op.mode);
    let v = bus.read(operand.addr);
    compare(cpu, reg, v);
    add_page_cross_penalty(cycles, operand);
    true
}
