//! Fetch/decode/execute.
//!
//! The interpreter is a set of `GameBoy` methods: instruction semantics need
//! the register file, the memory map, and the scheduler at once, and the
//! machine struct is the single mutable borrow that reaches all three.
//! Every instruction advances the scheduler by its exact M-cycle cost.

mod alu;
mod bit;
mod branch;
mod load;
mod stack;

use log::{debug, warn};

use crate::gb::GameBoy;

/// Interrupt vectors in dispatch priority order:
/// V-blank, STAT, timer, serial, joypad.
const INT_VECTORS: [u16; 5] = [0x40, 0x48, 0x50, 0x58, 0x60];

impl GameBoy {
    /// Advance emulated time.
    pub(crate) fn tick(&mut self, mcycles: i16) {
        let Self { cpu, mem, sch, .. } = self;
        sch.advance(cpu, mem, mcycles);
    }

    pub(crate) fn read8(&self, addr: u16) -> u8 {
        self.mem.read(addr)
    }

    pub(crate) fn write8(&mut self, addr: u16, val: u8) {
        let Self { mem, sch, .. } = self;
        mem.write(sch, addr, val);
    }

    fn fetch8(&mut self) -> u8 {
        let byte = self.mem.read(self.cpu.pc);
        self.cpu.pc = self.cpu.pc.wrapping_add(1);
        byte
    }

    pub(crate) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8() as u16;
        let hi = self.fetch8() as u16;
        (hi << 8) | lo
    }

    /// Register pair by opcode index, SP variant (0=BC 1=DE 2=HL 3=SP).
    pub(crate) fn get_pair_sp(&self, idx: u8) -> u16 {
        match idx & 0x03 {
            0 => self.cpu.get_bc(),
            1 => self.cpu.get_de(),
            2 => self.cpu.get_hl(),
            _ => self.cpu.sp,
        }
    }

    pub(crate) fn set_pair_sp(&mut self, idx: u8, val: u16) {
        match idx & 0x03 {
            0 => self.cpu.set_bc(val),
            1 => self.cpu.set_de(val),
            2 => self.cpu.set_hl(val),
            _ => self.cpu.sp = val,
        }
    }

    /// Execute one instruction, service one interrupt, or burn one halted
    /// cycle. Returns true when the V-blank handler was entered.
    pub fn step(&mut self) -> bool {
        if self.cpu.ime {
            let pending = self.mem.pending_interrupts();
            if pending != 0 {
                return self.service_interrupt(pending);
            }
        }
        if self.cpu.halted {
            // Halted: time passes one M-cycle at a time until an enabled
            // interrupt is requested.
            self.tick(1);
            if self.mem.pending_interrupts() != 0 {
                self.cpu.halted = false;
            }
            return false;
        }
        let opcode = self.fetch8();
        self.execute(opcode);
        false
    }

    /// Dispatch to the handler of the highest-priority pending interrupt.
    /// Costs 5 M-cycles; returns true for the V-blank vector.
    fn service_interrupt(&mut self, pending: u8) -> bool {
        self.cpu.ime = false;
        self.cpu.halted = false;
        self.tick(2);
        let pc = self.cpu.pc;
        self.push16(pc);
        self.tick(2);
        // The push itself can write IF/IE; whatever is pending after it
        // decides the vector, falling back to the pre-push sample if the
        // push cleared everything.
        let sampled = match self.mem.pending_interrupts() {
            0 => pending,
            p => p,
        };
        let bit = sampled.trailing_zeros() as usize;
        self.mem.clear_interrupt(1u8 << bit);
        self.cpu.pc = INT_VECTORS[bit];
        self.tick(1);
        bit == 0
    }

    pub(crate) fn execute(&mut self, opcode: u8) {
        match opcode {
            0x00 => self.tick(1),
            0x10 => self.op_stop(),
            0x76 => self.op_halt(),
            0xF3 => {
                self.cpu.ime = false;
                self.tick(1);
            }
            0xFB => self.op_ei(),
            0xCB => self.op_cb_prefix(),

            // 16-bit loads
            0x01 | 0x11 | 0x21 | 0x31 => self.op_ld_r16_d16(opcode),
            0x08 => self.op_ld_a16_sp(),
            0xF8 => self.op_ld_hl_sp_s8(),
            0xF9 => self.op_ld_sp_hl(),
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.op_pop(opcode),
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.op_push(opcode),

            // 8-bit loads
            0x02 | 0x12 | 0x22 | 0x32 => self.op_ld_r16_ptr_a(opcode),
            0x0A | 0x1A | 0x2A | 0x3A => self.op_ld_a_r16_ptr(opcode),
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => self.op_ld_r_d8(opcode),
            0x40..=0x75 | 0x77..=0x7F => self.op_ld_r_r(opcode),
            0xE0 => self.op_ldh_a8_a(),
            0xF0 => self.op_ldh_a_a8(),
            0xE2 => self.op_ldh_c_a(),
            0xF2 => self.op_ldh_a_c(),
            0xEA => self.op_ld_a16_a(),
            0xFA => self.op_ld_a_a16(),

            // 16-bit arithmetic
            0x03 | 0x13 | 0x23 | 0x33 => self.op_inc16(opcode),
            0x0B | 0x1B | 0x2B | 0x3B => self.op_dec16(opcode),
            0x09 | 0x19 | 0x29 | 0x39 => self.op_add_hl_r16(opcode),
            0xE8 => self.op_add_sp_s8(),

            // 8-bit arithmetic / logic
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => self.op_inc8(opcode),
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => self.op_dec8(opcode),
            0x80..=0xBF => self.op_alu_r(opcode),
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => self.op_alu_d8(opcode),
            0x27 => self.op_daa(),
            0x2F => self.op_cpl(),
            0x37 => self.op_scf(),
            0x3F => self.op_ccf(),

            // Accumulator rotations
            0x07 | 0x0F | 0x17 | 0x1F => self.op_rot_a(opcode),

            // Branching
            0x18 => self.op_jr(),
            0x20 | 0x28 | 0x30 | 0x38 => self.op_jr_cc(opcode),
            0xC3 => self.op_jp(),
            0xC2 | 0xCA | 0xD2 | 0xDA => self.op_jp_cc(opcode),
            0xE9 => self.op_jp_hl(),
            0xCD => self.op_call(),
            0xC4 | 0xCC | 0xD4 | 0xDC => self.op_call_cc(opcode),
            0xC9 => self.op_ret(),
            0xC0 | 0xC8 | 0xD0 | 0xD8 => self.op_ret_cc(opcode),
            0xD9 => self.op_reti(),
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.op_rst(opcode),

            _ => self.op_invalid(opcode),
        }
    }

    fn op_halt(&mut self) {
        self.tick(1);
        if !self.cpu.ime && self.mem.pending_interrupts() != 0 {
            // Pending interrupt with IME clear: HALT falls straight
            // through (the HALT PC bug is not modeled).
            return;
        }
        self.cpu.halted = true;
    }

    fn op_stop(&mut self) {
        debug!("STOP at {:#06x}", self.cpu.pc.wrapping_sub(1));
        self.cpu.stopped = true;
        // The canonical encoding is 0x10 0x00; swallow the pad byte.
        if self.mem.read(self.cpu.pc) == 0x00 {
            self.cpu.pc = self.cpu.pc.wrapping_add(1);
        }
        self.tick(1);
    }

    /// EI takes effect only after the following instruction. An EI/DI
    /// pair cancels out, an EI/EI pair collapses, and anything else runs
    /// inline before the master enable flips.
    fn op_ei(&mut self) {
        self.tick(1);
        match self.mem.read(self.cpu.pc) {
            0xF3 => {
                self.cpu.pc = self.cpu.pc.wrapping_add(1);
                self.tick(1);
            }
            0xFB => {
                self.cpu.pc = self.cpu.pc.wrapping_add(1);
                self.tick(1);
                self.cpu.ime = true;
            }
            _ => {
                let opcode = self.fetch8();
                self.execute(opcode);
                self.cpu.ime = true;
            }
        }
    }

    fn op_invalid(&mut self, opcode: u8) {
        warn!(
            "invalid opcode {opcode:#04x} at {:#06x}, executing as NOP",
            self.cpu.pc.wrapping_sub(1)
        );
        self.tick(1);
    }
}
