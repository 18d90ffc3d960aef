/*!
table.rs - Opcode table: all 256 opcode bytes mapped to an instruction,
an addressing mode and a base cycle cost.

The table is built at compile time. Every byte starts out as
`Instr::Illegal` (2 cycles) and is then overwritten with its real entry, so
the opcodes that stay illegal are exactly the JAM/KIL family and the
unstable combinations (0x8B, 0xAB, 0x93, 0x9B, 0x9C, 0x9E, 0x9F, 0xBB).

Base costs exclude the dynamic extras that family handlers add:
- +1 when an indexed read crosses a page
- +1 for a taken branch, +1 more when it lands on another page
- the OAM DMA stall folded in by the dispatcher
*/

use crate::cpu::addressing::AddrMode::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented but stable.
    Lax,
    Sax,
    Dcp,
    Isb,
    Slo,
    Rla,
    Sre,
    Rra,
    Anc,
    Alr,
    Arr,
    Axs,
    Illegal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub instr: Instr,
    pub mode: AddrMode,
    pub cycles: u8,
}

const fn op(instr: Instr, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        instr,
        mode,
        cycles,
    }
}

const ILLEGAL: Opcode = op(Instr::Illegal, Implied, 2);

pub static OPCODES: [Opcode; 256] = build();

#[inline]
pub fn lookup(opcode: u8) -> &'static Opcode {
    &OPCODES[opcode as usize]
}

/// The seven addressing forms shared by the undocumented RMW+ALU combos.
const fn combo(t: &mut [Opcode; 256], instr: Instr, base: usize) {
    t[base + 0x07] = op(instr, ZeroPage, 5);
    t[base + 0x17] = op(instr, ZeroPageX, 6);
    t[base + 0x0F] = op(instr, Absolute, 6);
    t[base + 0x1F] = op(instr, AbsoluteX, 7);
    t[base + 0x1B] = op(instr, AbsoluteY, 7);
    t[base + 0x03] = op(instr, IndirectX, 8);
    t[base + 0x13] = op(instr, IndirectY, 8);
}

/// The eight forms of the accumulator ALU group (ORA/AND/EOR/ADC/STA/LDA/CMP/SBC).
const fn alu(t: &mut [Opcode; 256], instr: Instr, base: usize) {
    t[base + 0x09] = op(instr, Immediate, 2);
    t[base + 0x05] = op(instr, ZeroPage, 3);
    t[base + 0x15] = op(instr, ZeroPageX, 4);
    t[base + 0x0D] = op(instr, Absolute, 4);
    t[base + 0x1D] = op(instr, AbsoluteX, 4);
    t[base + 0x19] = op(instr, AbsoluteY, 4);
    t[base + 0x01] = op(instr, IndirectX, 6);
    t[base + 0x11] = op(instr, IndirectY, 5);
}

/// Shift/rotate group: accumulator plus four memory forms.
const fn shift(t: &mut [Opcode; 256], instr: Instr, base: usize) {
    t[base + 0x0A] = op(instr, Accumulator, 2);
    t[base + 0x06] = op(instr, ZeroPage, 5);
    t[base + 0x16] = op(instr, ZeroPageX, 6);
    t[base + 0x0E] = op(instr, Absolute, 6);
    t[base + 0x1E] = op(instr, AbsoluteX, 7);
}

const fn build() -> [Opcode; 256] {
    use Instr::*;
    let mut t = [ILLEGAL; 256];

    alu(&mut t, Ora, 0x00);
    alu(&mut t, And, 0x20);
    alu(&mut t, Eor, 0x40);
    alu(&mut t, Adc, 0x60);
    alu(&mut t, Lda, 0xA0);
    alu(&mut t, Cmp, 0xC0);
    alu(&mut t, Sbc, 0xE0);

    // STA has no immediate form and fixed indexed costs.
    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x81] = op(Sta, IndirectX, 6);
    t[0x91] = op(Sta, IndirectY, 6);

    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 4);

    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 4);

    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, Absolute, 4);

    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, Absolute, 4);

    t[0xAA] = op(Tax, Implied, 2);
    t[0xA8] = op(Tay, Implied, 2);
    t[0x8A] = op(Txa, Implied, 2);
    t[0x98] = op(Tya, Implied, 2);
    t[0xBA] = op(Tsx, Implied, 2);
    t[0x9A] = op(Txs, Implied, 2);

    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x2C] = op(Bit, Absolute, 4);

    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, Absolute, 4);
    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, Absolute, 4);

    shift(&mut t, Asl, 0x00);
    shift(&mut t, Rol, 0x20);
    shift(&mut t, Lsr, 0x40);
    shift(&mut t, Ror, 0x60);

    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xFE] = op(Inc, AbsoluteX, 7);
    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xDE] = op(Dec, AbsoluteX, 7);

    t[0xE8] = op(Inx, Implied, 2);
    t[0xC8] = op(Iny, Implied, 2);
    t[0xCA] = op(Dex, Implied, 2);
    t[0x88] = op(Dey, Implied, 2);

    t[0x10] = op(Bpl, Relative, 2);
    t[0x30] = op(Bmi, Relative, 2);
    t[0x50] = op(Bvc, Relative, 2);
    t[0x70] = op(Bvs, Relative, 2);
    t[0x90] = op(Bcc, Relative, 2);
    t[0xB0] = op(Bcs, Relative, 2);
    t[0xD0] = op(Bne, Relative, 2);
    t[0xF0] = op(Beq, Relative, 2);

    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x20] = op(Jsr, Absolute, 6);
    t[0x60] = op(Rts, Implied, 6);
    t[0x40] = op(Rti, Implied, 6);
    t[0x00] = op(Brk, Implied, 7);

    t[0x48] = op(Pha, Implied, 3);
    t[0x08] = op(Php, Implied, 3);
    t[0x68] = op(Pla, Implied, 4);
    t[0x28] = op(Plp, Implied, 4);

    t[0x18] = op(Clc, Implied, 2);
    t[0x38] = op(Sec, Implied, 2);
    t[0x58] = op(Cli, Implied, 2);
    t[0x78] = op(Sei, Implied, 2);
    t[0xB8] = op(Clv, Implied, 2);
    t[0xD8] = op(Cld, Implied, 2);
    t[0xF8] = op(Sed, Implied, 2);

    t[0xEA] = op(Nop, Implied, 2);

    // Undocumented NOPs: they still consume their operand bytes.
    t[0x1A] = op(Nop, Implied, 2);
    t[0x3A] = op(Nop, Implied, 2);
    t[0x5A] = op(Nop, Implied, 2);
    t[0x7A] = op(Nop, Implied, 2);
    t[0xDA] = op(Nop, Implied, 2);
    t[0xFA] = op(Nop, Implied, 2);
    t[0x80] = op(Nop, Immediate, 2);
    t[0x82] = op(Nop, Immediate, 2);
    t[0x89] = op(Nop, Immediate, 2);
    t[0xC2] = op(Nop, Immediate, 2);
    t[0xE2] = op(Nop, Immediate, 2);
    t[0x04] = op(Nop, ZeroPage, 3);
    t[0x44] = op(Nop, ZeroPage, 3);
    t[0x64] = op(Nop, ZeroPage, 3);
    t[0x14] = op(Nop, ZeroPageX, 4);
    t[0x34] = op(Nop, ZeroPageX, 4);
    t[0x54] = op(Nop, ZeroPageX, 4);
    t[0x74] = op(Nop, ZeroPageX, 4);
    t[0xD4] = op(Nop, ZeroPageX, 4);
    t[0xF4] = op(Nop, ZeroPageX, 4);
    t[0x0C] = op(Nop, Absolute, 4);
    t[0x1C] = op(Nop, AbsoluteX, 4);
    t[0x3C] = op(Nop, AbsoluteX, 4);
    t[0x5C] = op(Nop, AbsoluteX, 4);
    t[0x7C] = op(Nop, AbsoluteX, 4);
    t[0xDC] = op(Nop, AbsoluteX, 4);
    t[0xFC] = op(Nop, AbsoluteX, 4);

    t[0xA7] = op(Lax, ZeroPage, 3);
    t[0xB7] = op(Lax, ZeroPageY, 4);
    t[0xAF] = op(Lax, Absolute, 4);
    t[0xBF] = op(Lax, AbsoluteY, 4);
    t[0xA3] = op(Lax, IndirectX, 6);
    t[0xB3] = op(Lax, IndirectY, 5);

    t[0x87] = op(Sax, ZeroPage, 3);
    t[0x97] = op(Sax, ZeroPageY, 4);
    t[0x8F] = op(Sax, Absolute, 4);
    t[0x83] = op(Sax, IndirectX, 6);

    t[0xEB] = op(Sbc, Immediate, 2);

    combo(&mut t, Slo, 0x00);
    combo(&mut t, Rla, 0x20);
    combo(&mut t, Sre, 0x40);
    combo(&mut t, Rra, 0x60);
    combo(&mut t, Dcp, 0xC0);
    combo(&mut t, Isb, 0xE0);

    t[0x0B] = op(Anc, Immediate, 2);
    t[0x2B] = op(Anc, Immediate, 2);
    t[0x4B] = op(Alr, Immediate, 2);
    t[0x6B] = op(Arr, Immediate, 2);
    t[0xCB] = op(Axs, Immediate, 2);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ILLEGAL_OPCODES: [u8; 20] = [
        0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2, 0x8B, 0xAB,
        0x93, 0x9B, 0x9C, 0x9E, 0x9F, 0xBB,
    ];

    // Base cycle costs for every opcode, row = high nibble.
    #[rustfmt::skip]
    const BASE_CYCLES: [u8; 256] = [
        7,6,2,8,3,3,5,5,3,2,2,2,4,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
        6,6,2,8,3,3,5,5,4,2,2,2,4,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
        6,6,2,8,3,3,5,5,3,2,2,2,3,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
        6,6,2,8,3,3,5,5,4,2,2,2,5,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
        2,6,2,6,3,3,3,3,2,2,2,2,4,4,4,4,
        2,6,2,2,4,4,4,4,2,5,2,2,2,5,2,2,
        2,6,2,6,3,3,3,3,2,2,2,2,4,4,4,4,
        2,5,2,5,4,4,4,4,2,4,2,2,4,4,4,4,
        2,6,2,8,3,3,5,5,2,2,2,2,4,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
        2,6,2,8,3,3,5,5,2,2,2,2,4,4,6,6,
        2,5,2,8,4,4,6,6,2,4,2,7,4,4,7,7,
    ];

    #[test]
    fn base_cycles_match_reference() {
        for (byte, entry) in OPCODES.iter().enumerate() {
            assert_eq!(
                entry.cycles, BASE_CYCLES[byte],
                "opcode ${:02X} ({:?} {:?})",
                byte, entry.instr, entry.mode
            );
        }
    }

    #[test]
    fn only_jam_and_unstable_opcodes_are_illegal() {
        for byte in 0..=255u8 {
            let illegal = lookup(byte).instr == Instr::Illegal;
            assert_eq!(illegal, ILLEGAL_OPCODES.contains(&byte), "opcode ${:02X}", byte);
        }
    }

    #[test]
    fn documented_spot_checks() {
        assert_eq!(*lookup(0xA9), op(Instr::Lda, Immediate, 2));
        assert_eq!(*lookup(0x6C), op(Instr::Jmp, Indirect, 5));
        assert_eq!(*lookup(0x91), op(Instr::Sta, IndirectY, 6));
        assert_eq!(*lookup(0xBE), op(Instr::Ldx, AbsoluteY, 4));
        assert_eq!(*lookup(0x96), op(Instr::Stx, ZeroPageY, 4));
        assert_eq!(*lookup(0x7E), op(Instr::Ror, AbsoluteX, 7));
    }
}
