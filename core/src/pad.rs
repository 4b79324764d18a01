//! Pad snapshot algebra.
//!
//! The pad is an 8-bit snapshot with the same active-low convention as the
//! JOYP register: a 0 bit means pressed. The low nibble is the d-pad, the
//! high nibble the buttons.

/// D-pad inputs (low nibble).
pub const RIGHT: u8 = 0x01;
pub const LEFT: u8 = 0x02;
pub const UP: u8 = 0x04;
pub const DOWN: u8 = 0x08;
/// Button inputs (high nibble).
pub const A: u8 = 0x10;
pub const B: u8 = 0x20;
pub const SELECT: u8 = 0x40;
pub const START: u8 = 0x80;

pub const DPAD_INPUTS: u8 = RIGHT | LEFT | UP | DOWN;
pub const BUTTON_INPUTS: u8 = A | B | SELECT | START;

/// JOYP select lines (active-low, bits 4 and 5 of FF00).
pub const JOYP_READ_DPAD: u8 = 0x10;
pub const JOYP_READ_BUTTONS: u8 = 0x20;
pub const JOYP_INPUT_BITS: u8 = 0x0F;

/// All inputs released.
pub fn init() -> u8 {
    0xFF
}

/// Pressed inputs are low, mimicking JOYP.
pub fn press(pad: u8, inputs: u8) -> u8 {
    pad & !inputs
}

/// Released inputs are high, mimicking JOYP.
pub fn release(pad: u8, inputs: u8) -> u8 {
    pad | inputs
}

/// Derive the readable JOYP byte from a pad snapshot and the written
/// select bits. A select line held low folds that half of the pad into
/// the low nibble; undriven lines float high.
pub fn joyp(pad: u8, select: u8) -> u8 {
    let mut joyp = 0xFF;
    if select & JOYP_READ_DPAD == 0 {
        // ORing !JOYP_INPUT_BITS keeps the other half's inputs out of
        // the AND below.
        joyp &= !JOYP_READ_DPAD & (pad | !JOYP_INPUT_BITS);
    }
    if select & JOYP_READ_BUTTONS == 0 {
        joyp &= !JOYP_READ_BUTTONS & ((pad >> 4) | !JOYP_INPUT_BITS);
    }
    joyp
}

/// Bits that went low→high between `old` and `new`.
pub fn rising(old: u8, new: u8) -> u8 {
    (old ^ new) & !old
}

/// Bits that went high→low between `old` and `new`.
/// The JOYP interrupt fires on these.
pub fn falling(old: u8, new: u8) -> u8 {
    (old ^ new) & !new
}
