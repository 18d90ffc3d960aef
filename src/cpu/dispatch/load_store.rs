/*!
load_store.rs - Loads, stores and register transfers.

Loads (LDA/LDX/LDY) set Z/N and pay the page-cross cycle. Stores never
do. Transfers set Z/N except TXS.
*/

use crate::bus::Bus;
use crate::cpu::addressing::resolve;
use crate::cpu::execute::{lda, ldx, ldy};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Instr, Opcode};

use super::add_page_cross_penalty;

pub(super) fn handle<C: CpuRegs>(op: &Opcode, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    match op.instr {
        Instr::Lda | Instr::Ldx | Instr::Ldy => {
            let operand = resolve(cpu, bus, op.mode);
            let v = bus.read(operand.addr);
            match op.instr {
                Instr::Lda => lda(cpu, v),
                Instr::Ldx => ldx(cpu, v),
                _ => ldy(cpu, v),
            }
            add_page_cross_penalty(cycles, operand);
        }
        Instr::Sta | Instr::Stx | Instr::Sty => {
            let operand = resolve(cpu, bus, op.mode);
            let v = match op.instr {
                Instr::Sta => cpu.a(),
                Instr::Stx => cpu.x(),
                _ => cpu.y(),
            };
            bus.write(operand.addr, v);
        }
        Instr::Tax | Instr::Tay | Instr::Txa | Instr::Tya | Instr::Tsx => {
            let (a, x, y, sp) = (cpu.a(), cpu.x(), cpu.y(), cpu.sp());
            match op.instr {
                Instr::Tax => ldx(cpu, a),
                Instr::Tay => ldy(cpu, a),
                Instr::Txa => lda(cpu, x),
                Instr::Tya => lda(cpu, y),
                _ => ldx(cpu, sp),
            }
        }
        Instr::Txs => cpu.set_sp(cpu.x()),
        _ => return false,
    }
    true
}
