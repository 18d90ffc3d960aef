/*!
branches.rs - Conditional relative branches.

Cost: 2 when not taken, 3 when taken, 4 when the target lies on a
different page than the instruction that follows the branch.
*/

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::get_flag;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::{Instr, Opcode};

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    let take = match op.instr {
        Instr::Bpl => !get_flag(cpu, NEGATIVE),
        Instr::Bmi => get_flag(cpu, NEGATIVE),
        Instr::Bvc => !get_flag(cpu, OVERFLOW),
        Instr::Bvs => get_flag(cpu, OVERFLOW),
        Instr::Bcc => !get_flag(cpu, CARRY),
        Instr::Bcs => get_flag(cpu, CARRY),
        Instr::Bne => !get_flag(cpu, ZERO),
        Instr::Beq => get_flag(cpu, ZERO),
        _ => return false,
    };
    let target = resolve(cpu, bus, op.mode);
    if take {
        cpu.set_pc(target.addr);
        *cycles += 1 + target.page_crossed as u32;
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::test_utils::cpu_with_program;

    #[test]
    fn not_taken_costs_two() {
        // SEC ; BCC +2
        let (mut cpu, mut bus) = cpu_with_program(&[0x38, 0x90, 0x02]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.pc(), 0x8003);
    }

    #[test]
    fn taken_same_page_costs_three() {
        // CLC ; BCC +2 ; (skipped) ; (skipped) ; NOP
        let (mut cpu, mut bus) = cpu_with_program(&[0x18, 0x90, 0x02, 0xEA, 0xEA, 0xEA]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn taken_backward_across_page_costs_four() {
        // BNE -3 from $8000: next = $8002, target = $7FFF.
        let (mut cpu, mut bus) = cpu_with_program(&[0xD0, 0xFD]);
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.pc(), 0x7FFF);
    }

    #[test]
    fn branch_to_self_loops() {
        // Z is clear after reset, so BNE -2 spins in place.
        let (mut cpu, mut bus) = cpu_with_program(&[0xD0, 0xFE]);
        for _ in 0..3 {
            assert_eq!(cpu.step(&mut bus), 3);
            assert_eq!(cpu.pc(), 0x8000);
        }
    }
}
