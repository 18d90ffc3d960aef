/*!
cpu - Ricoh 2A03 CPU core (6502 without decimal mode).

```text
state.rs       - registers, flag bits, vectors, soft fault
regs.rs        - `CpuRegs`, the register/flag interface handlers use
addressing.rs  - addressing modes and operand resolution
table.rs       - 256-entry opcode table (instruction, mode, base cycles)
execute.rs     - instruction semantics (ALU, shifts, stack, interrupts)
dispatch/      - per-family handlers and the step orchestration
core/          - the `Cpu` facade
```

```ignore
use nesdot::cpu::Cpu;

let mut cpu = Cpu::new();
cpu.reset(&mut bus);
let cycles = cpu.step(&mut bus);
```
*/

pub mod addressing;
pub mod core;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod table;

pub use crate::cpu::core::Cpu;
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuFault, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
