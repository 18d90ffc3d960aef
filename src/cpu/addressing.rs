/*!
addressing.rs - 6502 addressing modes and operand resolution.

`resolve` consumes the operand bytes that follow the opcode and returns the
effective address together with a page-cross flag. It never reads the
operand itself and never touches cycle counts; family handlers decide
whether a crossing costs a cycle (reads only).

Per mode, the resolved `Operand::addr` is:
- Implied / Accumulator: unused (0)
- Immediate: address of the immediate byte
- Relative: the branch target; `page_crossed` compares it with the address
  of the next instruction
- Indirect: the JMP target, read with the page-wrap quirk
- everything else: the effective data address

Zero-page indexed and zero-page indirect pointer reads wrap inside page 0.
*/

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    pub addr: u16,
    pub page_crossed: bool,
}

impl Operand {
    #[inline]
    const fn at(addr: u16) -> Self {
        Self {
            addr,
            page_crossed: false,
        }
    }

    #[inline]
    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Self {
            addr,
            page_crossed: (base ^ addr) & 0xFF00 != 0,
        }
    }
}

pub(crate) fn fetch_byte<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let v = bus.read(cpu.pc());
    cpu.advance_pc(1);
    v
}

pub(crate) fn fetch_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = fetch_byte(cpu, bus) as u16;
    let hi = fetch_byte(cpu, bus) as u16;
    (hi << 8) | lo
}

pub(crate) fn resolve<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, mode: AddrMode) -> Operand {
    match mode {
        AddrMode::Implied | AddrMode::Accumulator => Operand::at(0),
        AddrMode::Immediate => {
            let addr = cpu.pc();
            cpu.advance_pc(1);
            Operand::at(addr)
        }
        AddrMode::ZeroPage => Operand::at(fetch_byte(cpu, bus) as u16),
        AddrMode::ZeroPageX => Operand::at(fetch_byte(cpu, bus).wrapping_add(cpu.x()) as u16),
        AddrMode::ZeroPageY => Operand::at(fetch_byte(cpu, bus).wrapping_add(cpu.y()) as u16),
        AddrMode::Absolute => Operand::at(fetch_word(cpu, bus)),
        AddrMode::AbsoluteX => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(base, cpu.x())
        }
        AddrMode::AbsoluteY => {
            let base = fetch_word(cpu, bus);
            Operand::indexed(base, cpu.y())
        }
        AddrMode::Indirect => {
            let ptr = fetch_word(cpu, bus);
            Operand::at(read_word_indirect_bug(bus, ptr))
        }
        AddrMode::IndirectX => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
            Operand::at(read_word_zp(bus, zp))
        }
        AddrMode::IndirectY => {
            let zp = fetch_byte(cpu, bus);
            let base = read_word_zp(bus, zp);
            Operand::indexed(base, cpu.y())
        }
        AddrMode::Relative => {
            let offset = fetch_byte(cpu, bus) as i8;
            let next = cpu.pc();
            let target = next.wrapping_add(offset as i16 as u16);
            Operand {
                addr: target,
                page_crossed: (next ^ target) & 0xFF00 != 0,
            }
        }
    }
}

/// Little-endian pointer from zero page; the high byte wraps to $00.
#[inline]
pub(crate) fn read_word_zp(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP ($xxFF) takes its high byte from $xx00, not the next page.
#[inline]
pub(crate) fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}
