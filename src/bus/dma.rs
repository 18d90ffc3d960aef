/*!
OAM DMA ($4014).

Writing page `$XX` copies CPU `$XX00..=$XXFF` into OAM through the same
indexed write path as $2004 (so the copy starts at the current OAM cursor and
wraps). The transfer is performed at once; its cost is recorded as a stall the
CPU folds into the cycle count of the instruction that triggered it:
- 513 cycles when the running CPU cycle total is even,
- 514 cycles when it is odd (one extra alignment cycle).

The PPU keeps running through the stall because the console ticks it for
every cycle the instruction reports.
*/

use log::debug;

use super::Bus;

pub const OAM_DMA_CYCLES: u32 = 513;

/// Stall length for a DMA started when the CPU cycle total is `cpu_cycles`.
#[inline]
pub fn oam_dma_stall(cpu_cycles: u64) -> u32 {
    OAM_DMA_CYCLES + (cpu_cycles & 1) as u32
}

impl Bus {
    pub(in crate::bus) fn run_oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for i in 0..=0xFFu16 {
            let value = self.read(base | i);
            self.ppu.write_oam_data(value);
        }
        let stall = oam_dma_stall(self.cpu_cycles);
        self.dma_stall += stall;
        debug!("oam dma from ${:04X}, stall {} cycles", base, stall);
    }

    /// Hand the pending DMA stall to the CPU and clear it.
    pub fn take_dma_stall(&mut self) -> u32 {
        std::mem::take(&mut self.dma_stall)
    }
}
