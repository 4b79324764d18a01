mod common;
use common::{cycles_of, gb_with};

#[test]
fn test_add_a_b() {
    // ADD A,B (0x80)
    let mut gb = gb_with(&[0x80]);
    gb.cpu.a = 0x3A;
    gb.cpu.b = 0xC6;
    gb.step();
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.zf);
    assert!(!gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_add_half_carry_only() {
    let mut gb = gb_with(&[0x80]);
    gb.cpu.a = 0x0F;
    gb.cpu.b = 0x01;
    gb.step();
    assert_eq!(gb.cpu.a, 0x10);
    assert!(!gb.cpu.zf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_adc_folds_carry_into_both_flags() {
    // ADC A,B with carry set: 0x0F + 0x00 + 1 half-carries.
    let mut gb = gb_with(&[0x88]);
    gb.cpu.a = 0x0F;
    gb.cpu.b = 0x00;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x10);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_adc_carry_chain() {
    // 0xFF + 0x00 + carry = 0x00 with both carries out.
    let mut gb = gb_with(&[0x88]);
    gb.cpu.a = 0xFF;
    gb.cpu.b = 0x00;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.zf);
    assert!(gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_sub_borrow() {
    // SUB B (0x90): 0x3E - 0x40 borrows.
    let mut gb = gb_with(&[0x90]);
    gb.cpu.a = 0x3E;
    gb.cpu.b = 0x40;
    gb.step();
    assert_eq!(gb.cpu.a, 0xFE);
    assert!(!gb.cpu.zf);
    assert!(gb.cpu.nf);
    assert!(!gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_sub_half_borrow() {
    let mut gb = gb_with(&[0x90]);
    gb.cpu.a = 0x3E;
    gb.cpu.b = 0x0F;
    gb.step();
    assert_eq!(gb.cpu.a, 0x2F);
    assert!(gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_sbc_half_carry_from_carry_alone() {
    // SBC A,B with C=1, a&0xF=0, b&0xF=0: the borrowed 1 must half-carry.
    let mut gb = gb_with(&[0x98]);
    gb.cpu.a = 0x10;
    gb.cpu.b = 0x00;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x0F);
    assert!(gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_cp_discards_result() {
    // CP B (0xB8) sets flags like SUB but leaves A alone.
    let mut gb = gb_with(&[0xB8]);
    gb.cpu.a = 0x42;
    gb.cpu.b = 0x42;
    gb.step();
    assert_eq!(gb.cpu.a, 0x42);
    assert!(gb.cpu.zf);
    assert!(gb.cpu.nf);
}

#[test]
fn test_and_sets_half() {
    // AND C (0xA1)
    let mut gb = gb_with(&[0xA1]);
    gb.cpu.a = 0xF0;
    gb.cpu.c = 0x0F;
    gb.step();
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.zf);
    assert!(!gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_xor_a_clears_everything() {
    // XOR A (0xAF)
    let mut gb = gb_with(&[0xAF]);
    gb.cpu.a = 0x5A;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.zf);
    assert!(!gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_or_result_flags() {
    // OR D (0xB2)
    let mut gb = gb_with(&[0xB2]);
    gb.cpu.a = 0x10;
    gb.cpu.d = 0x03;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.a, 0x13);
    assert!(!gb.cpu.zf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_alu_hl_operand_costs_two_cycles() {
    // ADD A,(HL) (0x86)
    let mut gb = gb_with(&[0x86]);
    gb.cpu.set_hl(0xC000);
    let cycles = cycles_of(&mut gb, |gb| {
        gb.step();
    });
    assert_eq!(cycles, 2);
}

#[test]
fn test_alu_immediate() {
    // ADD A,$C6 (0xC6 0xC6)
    let mut gb = gb_with(&[0xC6, 0xC6]);
    gb.cpu.a = 0x3A;
    let cycles = cycles_of(&mut gb, |gb| {
        gb.step();
    });
    assert_eq!(cycles, 2);
    assert_eq!(gb.cpu.a, 0x00);
    assert!(gb.cpu.zf && gb.cpu.hf && gb.cpu.cf);
}

#[test]
fn test_inc8_preserves_carry() {
    // INC B (0x04) with carry set: C untouched, H from low nibble wrap.
    let mut gb = gb_with(&[0x04]);
    gb.cpu.b = 0x0F;
    gb.cpu.cf = true;
    gb.step();
    assert_eq!(gb.cpu.b, 0x10);
    assert!(!gb.cpu.zf);
    assert!(!gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_dec8_half_borrow() {
    // DEC B (0x05) from 0x10: low nibble wraps to 0xF.
    let mut gb = gb_with(&[0x05]);
    gb.cpu.b = 0x10;
    gb.step();
    assert_eq!(gb.cpu.b, 0x0F);
    assert!(gb.cpu.nf);
    assert!(gb.cpu.hf);
}

#[test]
fn test_dec8_to_zero() {
    let mut gb = gb_with(&[0x05]);
    gb.cpu.b = 0x01;
    gb.step();
    assert_eq!(gb.cpu.b, 0x00);
    assert!(gb.cpu.zf);
    assert!(!gb.cpu.hf);
}

#[test]
fn test_inc16_no_flags() {
    // INC BC (0x03) from 0xFFFF wraps without touching flags.
    let mut gb = gb_with(&[0x03]);
    gb.cpu.set_bc(0xFFFF);
    let (zf, nf, hf, cf) = (gb.cpu.zf, gb.cpu.nf, gb.cpu.hf, gb.cpu.cf);
    gb.step();
    assert_eq!(gb.cpu.get_bc(), 0x0000);
    assert_eq!(
        (gb.cpu.zf, gb.cpu.nf, gb.cpu.hf, gb.cpu.cf),
        (zf, nf, hf, cf)
    );
}

#[test]
fn test_add_hl_de() {
    // ADD HL,DE (0x19): 12-bit half carry, Z untouched.
    let mut gb = gb_with(&[0x19]);
    gb.cpu.set_hl(0x0FFF);
    gb.cpu.set_de(0x0001);
    gb.cpu.zf = true;
    gb.step();
    assert_eq!(gb.cpu.get_hl(), 0x1000);
    assert!(gb.cpu.zf); // untouched
    assert!(!gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_add_hl_overflow() {
    let mut gb = gb_with(&[0x19]);
    gb.cpu.set_hl(0x8000);
    gb.cpu.set_de(0x8000);
    gb.step();
    assert_eq!(gb.cpu.get_hl(), 0x0000);
    assert!(!gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_add_sp_minus_one_wraps_unsigned() {
    // ADD SP,-1 (0xE8 0xFF) at SP=0: result 0xFFFF, H and C from the
    // unsigned low-byte add (0x00 + 0xFF carries neither nibble).
    let mut gb = gb_with(&[0xE8, 0xFF]);
    gb.cpu.sp = 0x0000;
    gb.step();
    assert_eq!(gb.cpu.sp, 0xFFFF);
    assert!(!gb.cpu.zf);
    assert!(!gb.cpu.nf);
    assert!(!gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_add_sp_positive_carries() {
    // ADD SP,+0x01 at SP=0x00FF carries out of both nibble and byte.
    let mut gb = gb_with(&[0xE8, 0x01]);
    gb.cpu.sp = 0x00FF;
    gb.step();
    assert_eq!(gb.cpu.sp, 0x0100);
    assert!(gb.cpu.hf);
    assert!(gb.cpu.cf);
}

#[test]
fn test_cpl() {
    let mut gb = gb_with(&[0x2F]);
    gb.cpu.a = 0x35;
    gb.cpu.zf = true;
    gb.cpu.cf = false;
    gb.step();
    assert_eq!(gb.cpu.a, 0xCA);
    assert!(gb.cpu.zf); // untouched
    assert!(gb.cpu.nf);
    assert!(gb.cpu.hf);
    assert!(!gb.cpu.cf);
}

#[test]
fn test_scf_ccf() {
    let mut gb = gb_with(&[0x37, 0x3F, 0x3F]);
    gb.cpu.nf = true;
    gb.cpu.hf = true;
    gb.step(); // SCF
    assert!(gb.cpu.cf && !gb.cpu.nf && !gb.cpu.hf);
    gb.step(); // CCF
    assert!(!gb.cpu.cf);
    gb.step(); // CCF
    assert!(gb.cpu.cf);
}
