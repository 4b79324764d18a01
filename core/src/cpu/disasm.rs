//! Disassembler.
//!
//! Produces "byte-sequence  mnemonic operands" for the instruction at an
//! address, with optional live register/memory value annotation when CPU
//! state is supplied.

use super::Cpu;
use super::operand::{self, Decoded};
use crate::mem::Memory;

const REGS8: [&str; 8] = ["B", "C", "D", "E", "H", "L", "HL", "A"];
const PAIRS: [&str; 5] = ["BC", "DE", "HL", "SP", "AF"];
const FLAGS: [&str; 4] = ["NZ", "Z", "NC", "C"];

/// The eleven undefined opcodes disassemble to the literal token INVALID.
pub fn disassemble(mem: &Memory, addr: u16, cpu: Option<&Cpu>) -> String {
    let opcode = mem.read(addr);
    let (decoded, prefix_len): (Option<Decoded>, u16) = if opcode == 0xCB {
        (Some(operand::decode_cb(mem.read(addr.wrapping_add(1)))), 2)
    } else {
        (operand::decode(opcode), 1)
    };

    let Some(decoded) = decoded else {
        return format!("{:<10}INVALID", format!("{opcode:02X}"));
    };

    let mut len = prefix_len;
    for id in decoded.operands.into_iter().flatten() {
        len += operand::imm_len(id);
    }

    let mut bytes = String::new();
    for i in 0..len {
        if i > 0 {
            bytes.push(' ');
        }
        bytes.push_str(&format!("{:02X}", mem.read(addr.wrapping_add(i))));
    }

    let mut text = format!("{:<10}{}", bytes, decoded.mnemonic);
    let mut imm_at = addr.wrapping_add(prefix_len);
    let mut notes = Vec::new();
    for (i, id) in decoded.operands.into_iter().flatten().enumerate() {
        text.push(if i == 0 { ' ' } else { ',' });
        text.push_str(&format_operand(mem, id, &mut imm_at, cpu, &mut notes));
    }
    if !notes.is_empty() {
        text.push_str(" ; ");
        text.push_str(&notes.join(" "));
    }
    text
}

fn format_operand(
    mem: &Memory,
    id: u8,
    imm_at: &mut u16,
    cpu: Option<&Cpu>,
    notes: &mut Vec<String>,
) -> String {
    if id & operand::IMMEDIATE != 0 {
        if id & operand::AFTER != 0 {
            let text = if id & operand::WIDE != 0 {
                let val = mem.read16(*imm_at);
                *imm_at = imm_at.wrapping_add(2);
                format!("${val:04X}")
            } else {
                let val = mem.read(*imm_at);
                *imm_at = imm_at.wrapping_add(1);
                format!("${val:02X}")
            };
            return if id & operand::INDIRECT != 0 {
                format!("[{text}]")
            } else {
                text
            };
        }
        if id & operand::IS_RST != 0 {
            return format!("${:02X}", (id & operand::INDEX) * 8);
        }
        return format!("{}", id & operand::INDEX);
    }

    if id & operand::FLAG != 0 {
        return FLAGS[(id & 0x03) as usize].to_string();
    }

    if id == operand::SP_REL {
        let offset = mem.read(*imm_at) as i8;
        *imm_at = imm_at.wrapping_add(1);
        if let Some(cpu) = cpu {
            notes.push(format!("SP=${:04X}", cpu.sp));
        }
        return if offset < 0 {
            format!("SP-${:02X}", -(offset as i16))
        } else {
            format!("SP+${offset:02X}")
        };
    }

    let name = register_name(id);
    if let Some(cpu) = cpu {
        notes.push(annotate(mem, cpu, id, &name));
    }
    if id & operand::INDIRECT != 0 {
        format!("[{name}]")
    } else {
        name
    }
}

fn register_name(id: u8) -> String {
    let mut name = if id & operand::WIDE != 0 {
        PAIRS[(id & operand::INDEX) as usize].to_string()
    } else {
        REGS8[(id & operand::INDEX) as usize].to_string()
    };
    if id & operand::WIDE != 0 && id & operand::MODIFY != 0 {
        name.push(if id & operand::DECREMENT != 0 { '-' } else { '+' });
    }
    name
}

/// Current value of a register operand, through memory for pointers.
fn annotate(mem: &Memory, cpu: &Cpu, id: u8, name: &str) -> String {
    if id & operand::WIDE != 0 {
        let val = match id & operand::INDEX {
            0 => cpu.get_bc(),
            1 => cpu.get_de(),
            2 => cpu.get_hl(),
            3 => cpu.sp,
            _ => cpu.get_af(),
        };
        if id & operand::INDIRECT != 0 {
            format!("[{name}]=${:02X}", mem.read(val))
        } else {
            format!("{name}=${val:04X}")
        }
    } else {
        let val = match id & operand::INDEX {
            0 => cpu.b,
            1 => cpu.c,
            2 => cpu.d,
            3 => cpu.e,
            4 => cpu.h,
            5 => cpu.l,
            _ => cpu.a,
        };
        if id & operand::INDIRECT != 0 {
            format!("[{name}]=${:02X}", mem.read_ff(val))
        } else {
            format!("{name}=${val:02X}")
        }
    }
}
