//! Shifts and rotates: ASL / LSR / ROL / ROR on A or memory.

use crate::bus::Bus;
use crate::cpu::addressing::{AddrMode, resolve};
use crate::cpu::execute::{asl, lsr, rmw_memory, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instr, Opcode};

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, _cycles: &mut u32) -> bool {
    let f: fn(&mut C, u8) -> u8 = match op.instr {
        Instr::Asl => asl,
        Instr::Lsr => lsr,
        Instr::Rol => rol,
        Instr::Ror => ror,
        _ => return false,
    };
    if op.mode == AddrMode::Accumulator {
        let a = cpu.a();
        let r = f(cpu, a);
        cpu.set_a(r);
    } else {
        let operand = resolve(cpu, bus, op.mode);
        rmw_memory(cpu, bus, operand.addr, f);
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, ZERO};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn accumulator_shifts() {
        // LDA #$81 ; ASL A ; LSR A ; ROR A
        let (mut cpu, mut bus) = cpu_with_program(&[0xA9, 0x81, 0x0A, 0x4A, 0x6A]);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.a(), 0x02);
        assert!(cpu.flag(CARRY));
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x01);
        assert!(!cpu.flag(CARRY));
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag(CARRY) && cpu.flag(ZERO));
    }

    #[test]
    fn memory_rotate_with_carry() {
        // SEC ; ROL $10 ; ROL $0300,X
        let (mut cpu, mut bus) = cpu_with_program(&[0x38, 0x26, 0x10, 0x3E, 0x00, 0x03]);
        bus.write(0x0010, 0x80);
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(bus.read(0x0010), 0x01);
        assert!(cpu.flag(CARRY));
        assert_eq!(cpu.step(&mut bus), 7);
        assert_eq!(bus.read(0x0300), 0x01);
    }
}
