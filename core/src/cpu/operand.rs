//! Operand-id encoding shared by the decoder tables and the disassembler.
//!
//! An operand id is a tagged byte:
//!
//! - bit 7: 0 = register/flag, 1 = immediate
//! - bit 6: indirect pointer
//! - bit 5: 16-bit
//! - bit 4: `MODIFY` (post-inc/dec HL, or SP with a trailing signed
//!   offset) for registers; `AFTER` (value follows the opcode) for
//!   immediates
//! - bit 3: `FLAG` selector for registers; decrement direction for a
//!   modified HL; `IS_RST` for immediates
//! - bits 2..0: register/flag/bit index, or RST target / 8
//!
//! The indices follow the opcode bit patterns: 8-bit registers are
//! B,C,D,E,H,L,(HL),A = 0..7; pairs are BC,DE,HL,SP,AF = 0..4; flags are
//! NZ,Z,NC,C = 0..3.

pub const IMMEDIATE: u8 = 0x80;
pub const INDIRECT: u8 = 0x40;
pub const WIDE: u8 = 0x20;
pub const MODIFY: u8 = 0x10;
pub const AFTER: u8 = 0x10;
pub const FLAG: u8 = 0x08;
pub const DECREMENT: u8 = 0x08;
pub const IS_RST: u8 = 0x08;
pub const INDEX: u8 = 0x07;

/// 8-bit immediate following the opcode.
pub const D8: u8 = IMMEDIATE | AFTER;
/// 16-bit immediate following the opcode.
pub const D16: u8 = IMMEDIATE | AFTER | WIDE;
/// High-page pointer immediate (`LDH`).
pub const A8_PTR: u8 = IMMEDIATE | AFTER | INDIRECT;
/// Absolute pointer immediate.
pub const A16_PTR: u8 = IMMEDIATE | AFTER | INDIRECT | WIDE;

pub const REG_A: u8 = 7;
pub const REG_HL: u8 = WIDE | 2;
pub const REG_SP: u8 = WIDE | 3;
pub const REG_AF: u8 = WIDE | 4;
pub const HL_PTR: u8 = INDIRECT | WIDE | 2;
pub const HL_INC_PTR: u8 = INDIRECT | WIDE | MODIFY | 2;
pub const HL_DEC_PTR: u8 = INDIRECT | WIDE | MODIFY | DECREMENT | 2;
pub const C_PTR: u8 = INDIRECT | 1;
/// SP plus a trailing signed offset (`LD HL,SP+s8`).
pub const SP_REL: u8 = WIDE | MODIFY | 3;

/// 8-bit register id by opcode index; index 6 is the (HL) pointer.
pub fn reg8(idx: u8) -> u8 {
    if idx == 6 { HL_PTR } else { idx }
}

/// Register pair id, SP variant (BC/DE/HL/SP).
pub fn pair_sp(idx: u8) -> u8 {
    WIDE | (idx & 0x03)
}

/// Register pair id, AF variant (BC/DE/HL/AF).
pub fn pair_af(idx: u8) -> u8 {
    if idx & 0x03 == 3 { REG_AF } else { WIDE | (idx & 0x03) }
}

pub fn flag(idx: u8) -> u8 {
    FLAG | (idx & 0x03)
}

pub fn bit_n(n: u8) -> u8 {
    IMMEDIATE | (n & 0x07)
}

fn rst_target(opcode: u8) -> u8 {
    IMMEDIATE | IS_RST | ((opcode >> 3) & 0x07)
}

/// Pointer operand of the 0x02/0x12/0x22/0x32 column.
fn column_ptr(opcode: u8) -> u8 {
    match (opcode >> 4) & 0x03 {
        0 => INDIRECT | WIDE, // [BC]
        1 => INDIRECT | WIDE | 1,
        2 => HL_INC_PTR,
        _ => HL_DEC_PTR,
    }
}

/// Bytes of immediate data an operand consumes after the opcode.
pub fn imm_len(id: u8) -> u16 {
    if id & (IMMEDIATE | AFTER) == IMMEDIATE | AFTER {
        if id & WIDE != 0 { 2 } else { 1 }
    } else if id == SP_REL {
        1
    } else {
        0
    }
}

#[derive(Clone, Copy)]
pub struct Decoded {
    pub mnemonic: &'static str,
    pub operands: [Option<u8>; 2],
}

fn op(mnemonic: &'static str, a: Option<u8>, b: Option<u8>) -> Decoded {
    Decoded {
        mnemonic,
        operands: [a, b],
    }
}

/// ALU-group mnemonics and whether they name A explicitly.
const ALU: [(&str, bool); 8] = [
    ("ADD", true),
    ("ADC", true),
    ("SUB", false),
    ("SBC", true),
    ("AND", false),
    ("XOR", false),
    ("OR", false),
    ("CP", false),
];

/// Decode an unprefixed opcode into mnemonic and operand ids.
/// Returns None for the eleven undefined opcodes.
pub fn decode(opcode: u8) -> Option<Decoded> {
    Some(match opcode {
        0x00 => op("NOP", None, None),
        0x10 => op("STOP", None, None),
        0x76 => op("HALT", None, None),
        0xF3 => op("DI", None, None),
        0xFB => op("EI", None, None),
        0xCB => op("PREFIX", None, None),

        0x01 | 0x11 | 0x21 | 0x31 => op("LD", Some(pair_sp(opcode >> 4)), Some(D16)),
        0x08 => op("LD", Some(A16_PTR), Some(REG_SP)),
        0xF8 => op("LD", Some(REG_HL), Some(SP_REL)),
        0xF9 => op("LD", Some(REG_SP), Some(REG_HL)),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => op("POP", Some(pair_af(opcode >> 4)), None),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => op("PUSH", Some(pair_af(opcode >> 4)), None),

        0x02 | 0x12 | 0x22 | 0x32 => op("LD", Some(column_ptr(opcode)), Some(REG_A)),
        0x0A | 0x1A | 0x2A | 0x3A => op("LD", Some(REG_A), Some(column_ptr(opcode))),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            op("LD", Some(reg8((opcode >> 3) & 0x07)), Some(D8))
        }
        0x40..=0x75 | 0x77..=0x7F => op(
            "LD",
            Some(reg8((opcode >> 3) & 0x07)),
            Some(reg8(opcode & 0x07)),
        ),
        0xE0 => op("LDH", Some(A8_PTR), Some(REG_A)),
        0xF0 => op("LDH", Some(REG_A), Some(A8_PTR)),
        0xE2 => op("LD", Some(C_PTR), Some(REG_A)),
        0xF2 => op("LD", Some(REG_A), Some(C_PTR)),
        0xEA => op("LD", Some(A16_PTR), Some(REG_A)),
        0xFA => op("LD", Some(REG_A), Some(A16_PTR)),

        0x03 | 0x13 | 0x23 | 0x33 => op("INC", Some(pair_sp(opcode >> 4)), None),
        0x0B | 0x1B | 0x2B | 0x3B => op("DEC", Some(pair_sp(opcode >> 4)), None),
        0x09 | 0x19 | 0x29 | 0x39 => op("ADD", Some(REG_HL), Some(pair_sp(opcode >> 4))),
        0xE8 => op("ADD", Some(REG_SP), Some(D8)),

        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            op("INC", Some(reg8((opcode >> 3) & 0x07)), None)
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            op("DEC", Some(reg8((opcode >> 3) & 0x07)), None)
        }
        0x80..=0xBF => {
            let (mnemonic, has_a) = ALU[((opcode >> 3) & 0x07) as usize];
            let src = Some(reg8(opcode & 0x07));
            if has_a {
                op(mnemonic, Some(REG_A), src)
            } else {
                op(mnemonic, src, None)
            }
        }
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            let (mnemonic, has_a) = ALU[((opcode >> 3) & 0x07) as usize];
            if has_a {
                op(mnemonic, Some(REG_A), Some(D8))
            } else {
                op(mnemonic, Some(D8), None)
            }
        }
        0x27 => op("DAA", None, None),
        0x2F => op("CPL", None, None),
        0x37 => op("SCF", None, None),
        0x3F => op("CCF", None, None),

        0x07 => op("RLCA", None, None),
        0x0F => op("RRCA", None, None),
        0x17 => op("RLA", None, None),
        0x1F => op("RRA", None, None),

        0x18 => op("JR", Some(D8), None),
        0x20 | 0x28 | 0x30 | 0x38 => op("JR", Some(flag(opcode >> 3)), Some(D8)),
        0xC3 => op("JP", Some(D16), None),
        0xC2 | 0xCA | 0xD2 | 0xDA => op("JP", Some(flag(opcode >> 3)), Some(D16)),
        0xE9 => op("JP", Some(REG_HL), None),
        0xCD => op("CALL", Some(D16), None),
        0xC4 | 0xCC | 0xD4 | 0xDC => op("CALL", Some(flag(opcode >> 3)), Some(D16)),
        0xC9 => op("RET", None, None),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => op("RET", Some(flag(opcode >> 3)), None),
        0xD9 => op("RETI", None, None),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            op("RST", Some(rst_target(opcode)), None)
        }

        _ => return None,
    })
}

const CB_ROT: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

/// Decode a CB-prefixed opcode. Every CB byte is defined.
pub fn decode_cb(cb: u8) -> Decoded {
    let reg = Some(reg8(cb & 0x07));
    match cb >> 6 {
        0 => op(CB_ROT[((cb >> 3) & 0x07) as usize], reg, None),
        1 => op("BIT", Some(bit_n(cb >> 3)), reg),
        2 => op("RES", Some(bit_n(cb >> 3)), reg),
        _ => op("SET", Some(bit_n(cb >> 3)), reg),
    }
}
