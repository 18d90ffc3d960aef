/*!
arithmetic.rs - ADC / SBC, memory INC / DEC and the register
increments (INX/INY/DEX/DEY).

ADC/SBC pay the page-cross cycle; INC/DEC are read-modify-write and never
do.
*/

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::{adc, ldx, ldy, rmw_memory, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    match op.instr {
        Instr::Adc | Instr::Sbc => {
            let operand = resolve(cpu, bus, op.mode);
            let v = bus.read(operand.addr);
            if op.instr == Instr::Adc {
                adc(cpu, v);
            } else {
                sbc(cpu, v);
            }
            add_page_cross_penalty(cycles, operand);
        }
        Instr::Inc | Instr::Dec => {
            let operand = resolve(cpu, bus, op.mode);
            let delta = if op.instr == Instr::Inc { 1 } else { 0xFF };
            let r = rmw_memory(cpu, bus, operand.addr, |_, old| old.wrapping_add(delta));
            cpu.update_zn(r);
        }
        Instr::Inx | Instr::Dex => {
            let delta = if op.instr == Instr::Inx { 1 } else { 0xFF };
            let x = cpu.x().wrapping_add(delta);
            ldx(cpu, x);
        }
        Instr::Iny | Instr::Dey => {
            let delta = if op.instr == Instr::Iny { 1 } else { 0xFF };
            let y = cpu.y().wrapping_add(delta);
            ldy(cpu, y);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn adc_signed_overflow() {
        // CLC ; LDA #$50 ; ADC #$50
        let (mut cpu, mut bus) = cpu_with_program(&[0x18, 0xA9, 0x50, 0x69, 0x50]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0xA0);
        assert!(cpu.flag(OVERFLOW) && cpu.flag(NEGATIVE) && !cpu.flag(CARRY));
    }

    #[test]
    fn sbc_with_borrow() {
        // SEC ; LDA #$00 ; SBC #$01
        let (mut cpu, mut bus) = cpu_with_program(&[0x38, 0xA9, 0x00, 0xE9, 0x01]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0xFF);
        assert!(!cpu.flag(CARRY), "borrow taken");
    }

    #[test]
    fn unofficial_sbc_immediate_matches_official() {
        let (mut cpu, mut bus) = cpu_with_program(&[0x38, 0xA9, 0x10, 0xEB, 0x01]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.a(), 0x0F);
        assert!(cpu.flag(CARRY));
    }

    #[test]
    fn inc_dec_memory() {
        // INC $10 ; DEC $11 ; INC $0300,X
        let (mut cpu, mut bus) =
            cpu_with_program(&[0xE6, 0x10, 0xC6, 0x11, 0xFE, 0x00, 0x03]);
        bus.write(0x0010, 0xFF);
        bus.write(0x0011, 0x01);
        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(bus.read(0x0010), 0x00);
        assert!(cpu.flag(ZERO));
        cpu.step(&mut bus);
        assert_eq!(bus.read(0x0011), 0x00);
        assert_eq!(cpu.step(&mut bus), 7);
        assert_eq!(bus.read(0x0300), 0x01);
    }

    #[test]
    fn register_increments_wrap() {
        // DEX ; INY
        let (mut cpu, mut bus) = cpu_with_program(&[0xCA, 0xC8]);
        cpu.step(&mut bus);
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.flag(NEGATIVE));
        cpu.step(&mut bus);
        assert_eq!(cpu.y(), 0x01);
    }
}
