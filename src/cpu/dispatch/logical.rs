//! AND / ORA / EOR / BIT.

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::{and, bit, eor, ora};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    let f: fn(&mut C, u8) = match op.instr {
        Instr::And => and,
        Instr::Ora => ora,
        Instr::Eor => eor,
        Instr::Bit => bit,
        _ => return false,
    };
    let operand = resolve(cpu, bus, op.mode);
    let v = bus.read(operand.addr);
    f(cpu, v);
    add_page_cross_penalty(cycles, operand);
    true
}
