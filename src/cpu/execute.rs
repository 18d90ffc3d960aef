/*!
execute.rs - 6502 instruction semantics shared by the dispatch families.

Helpers are generic over `CpuRegs` and take `&mut Bus` only when they touch
memory. They never add cycles; the dispatcher owns cycle accounting.

The 2A03 has no decimal mode: ADC/SBC are binary regardless of D.

RMW instructions perform a single read and a single write. The extra write
of the unmodified value real hardware performs is not emitted, so a serial
mapper register sees exactly one write per instruction.
*/

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, IRQ_DISABLE, NEGATIVE, OVERFLOW, STACK_PAGE, ZERO};

#[inline]
pub(crate) fn set_flag<C: CpuRegs>(cpu: &mut C, mask: u8, on: bool) {
    cpu.assign_flag(mask, on);
}

#[inline]
pub(crate) fn get_flag<C: CpuRegs>(cpu: &C, mask: u8) -> bool {
    cpu.is_flag_set(mask)
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u8) {
    bus.write(STACK_PAGE | cpu.sp() as u16, v);
    cpu.set_sp(cpu.sp().wrapping_sub(1));
}

#[inline]
pub(crate) fn pop<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    cpu.set_sp(cpu.sp().wrapping_add(1));
    bus.read(STACK_PAGE | cpu.sp() as u16)
}

/// High byte first, so the low byte ends up at the lower address.
#[inline]
pub(crate) fn push_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, v as u8);
}

#[inline]
pub(crate) fn pop_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = pop(cpu, bus) as u16;
    let hi = pop(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push PC and status, set I, jump through `vector`. Shared by BRK, NMI
/// and IRQ; only BRK pushes B set.
pub(crate) fn enter_interrupt<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, return_pc: u16, vector: u16, brk: bool) {
    push_word(cpu, bus, return_pc);
    let status = cpu.compose_status_for_push(brk);
    push(cpu, bus, status);
    set_flag(cpu, IRQ_DISABLE, true);
    cpu.set_pc(bus.read_word(vector));
}

// ---------------------------------------------------------------------------
// Loads, transfers, logic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() & v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() | v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() ^ v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    let zero = cpu.a() & v == 0;
    set_flag(cpu, ZERO, zero);
    set_flag(cpu, NEGATIVE, v & 0x80 != 0);
    set_flag(cpu, OVERFLOW, v & 0x40 != 0);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as u16;
    let sum = a as u16 + v as u16 + carry_in;
    let result = sum as u8;

    cpu.update_carry(sum > 0xFF);
    // Signed overflow: both inputs share a sign the result does not.
    cpu.update_overflow((a ^ result) & (v ^ result) & 0x80 != 0);
    lda(cpu, result);
}

#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, !v);
}

/// CMP/CPX/CPY: C = reg >= v, Z/N from reg - v.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    cpu.update_carry(reg >= v);
    cpu.update_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Shifts / rotates on a value; the caller stores the result
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    cpu.update_carry(v & 0x80 != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn lsr<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    cpu.update_carry(v & 0x01 != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn rol<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = get_flag(cpu, CARRY) as u8;
    cpu.update_carry(v & 0x80 != 0);
    let r = (v << 1) | carry_in;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn ror<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = (get_flag(cpu, CARRY) as u8) << 7;
    cpu.update_carry(v & 0x01 != 0);
    let r = (v >> 1) | carry_in;
    cpu.update_zn(r);
    r
}

/// Read `addr`, store `transform(old)` back, return the new value.
pub(crate) fn rmw_memory<C: CpuRegs, F>(cpu: &mut C, bus: &mut Bus, addr: u16, transform: F) -> u8
where
    F: FnOnce(&mut C, u8) -> u8,
{
    let old = bus.read(addr);
    let new = transform(cpu, old);
    bus.write(addr, new);
    new
}
