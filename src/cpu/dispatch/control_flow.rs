/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK.

- JSR pushes the address of its own last byte; RTS pops and adds one.
- BRK is a two-byte instruction: it pushes the opcode address + 2, then
  status with B set, and vectors through $FFFE.
- RTI restores status (B discarded, U forced) and then PC, with no +1.
*/

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::{enter_interrupt, pop, pop_word, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::IRQ_VECTOR;
use crate::cpu::table::{Instr, Opcode};

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, _cycles: &mut u32) -> bool {
    match op.instr {
        Instr::Jmp => {
            let target = resolve(cpu, bus, op.mode);
            cpu.set_pc(target.addr);
        }
        Instr::Jsr => {
            let target = resolve(cpu, bus, op.mode);
            let ret = cpu.pc().wrapping_sub(1);
            push_word(cpu, bus, ret);
            cpu.set_pc(target.addr);
        }
        Instr::Rts => {
            let ret = pop_word(cpu, bus);
            cpu.set_pc(ret.wrapping_add(1));
        }
        Instr::Rti => {
            let status = pop(cpu, bus);
            cpu.set_status(status);
            let pc = pop_word(cpu, bus);
            cpu.set_pc(pc);
        }
        Instr::Brk => {
            // Skip the padding byte after the opcode.
            let ret = cpu.pc().wrapping_add(1);
            enter_interrupt(cpu, bus, ret, IRQ_VECTOR, true);
        }
        _ => return false,
    }
    true
}
