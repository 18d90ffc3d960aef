/*!
undocumented.rs - Stable undocumented opcodes.

- LAX: load A and X together.
- SAX: store A & X, flags untouched.
- DCP / ISB / SLO / RLA / SRE / RRA: a memory RMW (DEC, INC, ASL, ROL,
  LSR, ROR) followed by the matching ALU op on the new value (CMP, SBC,
  ORA, AND, EOR, ADC).
- ANC: AND, then C = N.
- ALR: AND, then LSR A.
- ARR: AND, then ROR A; C = bit 6 and V = bit 6 ^ bit 5 of the result.
- AXS: X = (A & X) - imm without borrow; C as for CMP.

Only LAX pays the page-cross cycle. The unstable combinations stay
illegal.
*/

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::{
    adc, and, asl, compare, eor, lda, ldx, lsr, ora, rmw_memory, rol, ror, sbc, set_flag,
};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW};
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    match op.instr {
        Instr::Lax => {
            let operand = resolve(cpu, bus, op.mode);
            let v = bus.read(operand.addr);
            lda(cpu, v);
            cpu.set_x(v);
            add_page_cross_penalty(cycles, operand);
        }
        Instr::Sax => {
            let operand = resolve(cpu, bus, op.mode);
            bus.write(operand.addr, cpu.a() & cpu.x());
        }
        Instr::Dcp => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, |_, old| old.wrapping_sub(1));
            let a = cpu.a();
            compare(cpu, a, m);
        }
        Instr::Isb => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, |_, old| old.wrapping_add(1));
            sbc(cpu, m);
        }
        Instr::Slo => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, asl);
            ora(cpu, m);
        }
        Instr::Rla => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, rol);
            and(cpu, m);
        }
        Instr::Sre => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, lsr);
            eor(cpu, m);
        }
        Instr::Rra => {
            let operand = resolve(cpu, bus, op.mode);
            let m = rmw_memory(cpu, bus, operand.addr, ror);
            adc(cpu, m);
        }
        Instr::Anc | Instr::Alr | Instr::Arr | Instr::Axs => {
            let operand = resolve(cpu, bus, op.mode);
            let v = bus.read(operand.addr);
            match op.instr {
                Instr::Anc => {
                    and(cpu, v);
                    let negative = cpu.is_flag_set(NEGATIVE);
                    set_flag(cpu, CARRY, negative);
                }
                Instr::Alr => {
                    and(cpu, v);
                    let a = cpu.a();
                    let r = lsr(cpu, a);
                    cpu.set_a(r);
                }
                Instr::Arr => {
                    and(cpu, v);
                    let a = cpu.a();
                    let r = ror(cpu, a);
                    cpu.set_a(r);
                    set_flag(cpu, CARRY, r & 0x40 != 0);
                    set_flag(cpu, OVERFLOW, ((r >> 6) ^ (r >> 5)) & 1 != 0);
                }
                _ => {
                    let t = cpu.a() & cpu.x();
                    compare(cpu, t, v);
                    ldx(cpu, t.wrapping_sub(v));
                }
            }
        }
        _ => return false,
    }
    true
}
