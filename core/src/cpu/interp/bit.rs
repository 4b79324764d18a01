//! The 0xCB-prefixed page: rotations, shifts, SWAP, and single-bit ops.

use crate::gb::GameBoy;

impl GameBoy {
    pub(crate) fn op_cb_prefix(&mut self) {
        let cb = self.fetch8();
        let reg = cb & 0x07;
        match cb >> 6 {
            0 => {
                // Rotation/shift group, read-modify-write.
                let op = (cb >> 3) & 0x07;
                if reg == 6 {
                    let addr = self.cpu.get_hl();
                    let val = self.read8(addr);
                    let result = self.cb_rot(op, val);
                    self.write8(addr, result);
                    self.tick(4);
                } else {
                    let val = self.cpu.get_reg8(reg);
                    let result = self.cb_rot(op, val);
                    self.cpu.set_reg8(reg, result);
                    self.tick(2);
                }
            }
            1 => {
                // BIT n,r: test only.
                let bit = (cb >> 3) & 0x07;
                let val = if reg == 6 {
                    let v = self.read8(self.cpu.get_hl());
                    self.tick(3);
                    v
                } else {
                    self.tick(2);
                    self.cpu.get_reg8(reg)
                };
                self.cpu.zf = val & (1 << bit) == 0;
                self.cpu.nf = false;
                self.cpu.hf = true;
            }
            res_set => {
                // RES/SET n,r: read-modify-write, flags untouched.
                let bit = (cb >> 3) & 0x07;
                let mask = 1u8 << bit;
                if reg == 6 {
                    let addr = self.cpu.get_hl();
                    let val = self.read8(addr);
                    let result = if res_set == 2 { val & !mask } else { val | mask };
                    self.write8(addr, result);
                    self.tick(4);
                } else {
                    let val = self.cpu.get_reg8(reg);
                    let result = if res_set == 2 { val & !mask } else { val | mask };
                    self.cpu.set_reg8(reg, result);
                    self.tick(2);
                }
            }
        }
    }

    /// Apply a rotation/shift-group operation, setting all four flags
    /// (Z from the result, C from the shifted-out bit).
    fn cb_rot(&mut self, op: u8, val: u8) -> u8 {
        let cpu = &mut self.cpu;
        let (result, carry) = match op {
            0 => (val.rotate_left(1), val & 0x80 != 0),  // RLC
            1 => (val.rotate_right(1), val & 0x01 != 0), // RRC
            2 => ((val << 1) | cpu.cf as u8, val & 0x80 != 0), // RL
            3 => ((val >> 1) | ((cpu.cf as u8) << 7), val & 0x01 != 0), // RR
            4 => (val << 1, val & 0x80 != 0),            // SLA
            5 => (((val as i8) >> 1) as u8, val & 0x01 != 0), // SRA keeps bit 7
            6 => (val.rotate_left(4), false),            // SWAP
            _ => (val >> 1, val & 0x01 != 0),            // SRL
        };
        cpu.zf = result == 0;
        cpu.nf = false;
        cpu.hf = false;
        cpu.cf = carry;
        result
    }

    /// 0x07/0x0F/0x17/0x1F: the accumulator rotations. Same circuits as
    /// the CB group but Z is forced clear.
    pub(crate) fn op_rot_a(&mut self, opcode: u8) {
        let op = (opcode >> 3) & 0x03;
        let val = self.cpu.a;
        self.cpu.a = self.cb_rot(op, val);
        self.cpu.zf = false;
        self.tick(1);
    }
}
