/*!
misc.rs - Stack pushes/pulls, flag set/clear and NOPs.

PHP pushes status with B and U set. PLP drops B and forces U.
Undocumented NOPs still fetch their operand and perform the read, so a
`NOP abs,X` pays the page-cross cycle like any other indexed read.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{AddrMode, resolve};
use crate::cpu::execute::{lda, pop, push, set_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    match op.instr {
        Instr::Pha => {
            let a = cpu.a();
            push(cpu, bus, a);
        }
        Instr::Php => {
            let status = cpu.compose_status_for_push(true);
            push(cpu, bus, status);
        }
        Instr::Pla => {
            let v = pop(cpu, bus);
            lda(cpu, v);
        }
        Instr::Plp => {
            let v = pop(cpu, bus);
            cpu.set_status(v);
        }
        Instr::Clc => set_flag(cpu, CARRY, false),
        Instr::Sec => set_flag(cpu, CARRY, true),
        Instr::Cli => set_flag(cpu, IRQ_DISABLE, false),
        Instr::Sei => set_flag(cpu, IRQ_DISABLE, true),
        Instr::Clv => set_flag(cpu, OVERFLOW, false),
        Instr::Cld => set_flag(cpu, DECIMAL, false),
        Instr::Sed => set_flag(cpu, DECIMAL, true),
        Instr::Nop => {
            if op.mode != AddrMode::Implied {
                let operand = resolve(cpu, bus, op.mode);
                let _ = bus.read(operand.addr);
                add_page_cross_penalty(cycles, operand);
            }
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{BREAK, CARRY, DECIMAL, NEGATIVE, UNUSED, ZERO};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn pha_pla_round_trip() {
        // LDA #$80 ; PHA ; LDA #$00 ; PLA
        let (mut cpu, mut bus) = cpu_with_program(&[0xA9, 0x80, 0x48, 0xA9, 0x00, 0x68]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.sp(), 0xFC);
        cpu.step(&mut bus);
        assert!(cpu.flag(ZERO));
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag(NEGATIVE) && !cpu.flag(ZERO));
    }

    #[test]
    fn pha_pla_across_stack_wrap() {
        // LDX #$00 ; TXS ; LDA #$77 ; PHA ; PHA ; LDA #$00 ; PLA ; PLA
        let (mut cpu, mut bus) = cpu_with_program(&[
            0xA2, 0x00, 0x9A, 0xA9, 0x77, 0x48, 0x48, 0xA9, 0x00, 0x68, 0x68,
        ]);
        for _ in 0..5 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.sp(), 0xFE);
        assert_eq!(bus.read(0x0100), 0x77);
        assert_eq!(bus.read(0x01FF), 0x77, "second push wrapped to the page top");
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.sp(), 0x00);
        assert_eq!(cpu.a(), 0x77);
    }

    #[test]
    fn php_sets_break_plp_drops_it() {
        // SEC ; SED ; PHP ; CLC ; PLP
        let (mut cpu, mut bus) = cpu_with_program(&[0x38, 0xF8, 0x08, 0x18, 0x28]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        let pushed = bus.read(0x01FD);
        assert_eq!(pushed & (BREAK | UNUSED), BREAK | UNUSED);
        cpu.step(&mut bus);
        assert!(!cpu.flag(CARRY));
        cpu.step(&mut bus);
        assert!(cpu.flag(CARRY) && cpu.flag(DECIMAL));
        assert_eq!(cpu.status() & BREAK, 0);
    }

    #[test]
    fn undocumented_nops_skip_operands() {
        // NOP #imm ; NOP zp ; NOP abs ; NOP (implied, $1A) ; LDA #$01
        let (mut cpu, mut bus) =
            cpu_with_program(&[0x80, 0xFF, 0x04, 0x10, 0x0C, 0x00, 0x03, 0x1A, 0xA9, 0x01]);
        let costs: Vec<u32> = (0..4).map(|_| cpu.step(&mut bus)).collect();
        assert_eq!(costs, vec![2, 3, 4, 2]);
        assert_eq!(cpu.pc(), 0x8008);
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x01);
        assert_eq!(cpu.fault(), None);
    }

    #[test]
    fn nop_absolute_x_pays_page_cross() {
        // LDX #$01 ; NOP $02FF,X
        let (mut cpu, mut bus) = cpu_with_program(&[0xA2, 0x01, 0x1C, 0xFF, 0x02]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 5);
    }
}
