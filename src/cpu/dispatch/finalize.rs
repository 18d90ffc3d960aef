//! Instruction finalization and the illegal-opcode path.

use log::warn;

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::CpuFault;

/// Add any pending OAM DMA stall, commit the total to the bus counter and
/// return it.
#[inline]
pub(super) fn finish(bus: &mut Bus, cycles: u32) -> u32 {
    let total = cycles + bus.take_dma_stall();
    bus.add_cycles(total);
    total
}

/// JAM and unstable opcodes: latch a soft fault and carry on. PC is left
/// just past the opcode byte and the table's base cost (2) is charged.
pub(super) fn illegal<C: CpuRegs>(cpu: &mut C, opcode: u8, pc: u16) {
    warn!("illegal opcode ${:02X} at ${:04X}", opcode, pc);
    cpu.raise_fault(CpuFault { opcode, pc });
}
