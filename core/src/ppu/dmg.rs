//! DMG scanline renderer.
//!
//! Each line is first encoded into packed per-pixel bytes (palette type,
//! priority, palette id, color index), then resolved through the BGP/OBP
//! palettes into ARGB words. No pixel FIFO: a whole line is produced at
//! once from the frame snapshot.

use super::{
    ATTR_BGPRIORITY, ATTR_DMGPAL, ATTR_XFLIP, ATTR_YFLIP, LCDC_BG_ENABLED, LCDC_BG_TILEDATA,
    LCDC_BG_TILEMAP, LCDC_OBJ_ENABLED, LCDC_OBJ_SIZE, LCDC_WND_ENABLED, LCDC_WND_TILEMAP,
    MAX_OBJS_PER_LINE, OBJ_XOFF, OBJ_YOFF, PpuState, SCR_HEIGHT, SCR_WIDTH, WND_XOFF,
};

// Encoded pixel bits.
/// Palette type: set = BG/window, clear = OBJ.
pub const ENC_PALETTE_TYPE: u8 = 0x80;
/// Colors 1-3 of this pixel may not be overdrawn (CGB BG attribute; always
/// clear in DMG BG entries).
pub const ENC_PRIORITY: u8 = 0x40;
/// Palette id, bits 4..2.
pub const ENC_PALETTE: u8 = 0x1C;
/// Color index, bits 1..0.
pub const ENC_COLOR: u8 = 0x03;

pub const ENC_BG: u8 = ENC_PALETTE_TYPE;
pub const ENC_OBJ: u8 = 0x00;

// VRAM layout offsets.
const VRAM_DATA0: usize = 0x0000;
const VRAM_DATA1: usize = 0x0800;
const VRAM_BGMAP0: usize = 0x1800;
const VRAM_BGMAP1: usize = 0x1C00;

const TILE_SIZE: usize = 16;
const TILES_PER_MAP_ROW: usize = 32;

/// Resolved palette table: OBP0 colors at 0..4, OBP1 at 4..8, BGP at 8..12.
const PALETTE_OBJ0: usize = 0;
const PALETTE_OBJ1: usize = 4;
const PALETTE_BG: usize = 8;

/// The default greyscale set (0xAARRGGBB).
pub const GREYSCALE: [u32; 4] = [0xFFFF_FFFF, 0xFFAA_AAAA, 0xFF55_5555, 0xFF00_0000];

/// Render all 144 lines of a frame into `frame` (row-major ARGB).
pub fn draw_frame(state: &PpuState, colors: &[u32; 4], frame: &mut [u32]) {
    let palettes = resolve_palettes(state, colors);
    for ly in 0..SCR_HEIGHT {
        let dst = &mut frame[ly * SCR_WIDTH..(ly + 1) * SCR_WIDTH];
        draw_line(state, &palettes, ly as u8, dst);
    }
}

pub fn draw_line(state: &PpuState, palettes: &[u32; 12], ly: u8, dst: &mut [u32]) {
    // BG color 0 everywhere, which is also the whole line when the BG
    // layer is disabled.
    let mut enc = [ENC_BG; SCR_WIDTH];
    if state.lcdc & LCDC_BG_ENABLED != 0 {
        encode_bg(state, ly, &mut enc);
    }
    if state.lcdc & LCDC_OBJ_ENABLED != 0 {
        encode_objs(state, ly, &mut enc);
    }
    for (px, &e) in dst.iter_mut().zip(enc.iter()) {
        let offset = if e & ENC_PALETTE_TYPE != 0 {
            PALETTE_BG
        } else if e & ENC_PALETTE & 0x04 != 0 {
            PALETTE_OBJ1
        } else {
            PALETTE_OBJ0
        };
        *px = palettes[offset + (e & ENC_COLOR) as usize];
    }
}

/// Encode the BG slice and, where visible, the window slice of a line.
fn encode_bg(state: &PpuState, ly: u8, enc: &mut [u8; SCR_WIDTH]) {
    // Tile-data addressing: base 0x8000 with plain indices, or base 0x9000
    // with signed indices — the XOR folds the sign flip into the index.
    let (base, xor) = if state.lcdc & LCDC_BG_TILEDATA != 0 {
        (VRAM_DATA0, 0x00)
    } else {
        (VRAM_DATA1, 0x80)
    };

    let wnd_x = state.wx as i32 - WND_XOFF as i32;
    let wnd_visible =
        state.lcdc & LCDC_WND_ENABLED != 0 && state.wy <= ly && wnd_x < SCR_WIDTH as i32;
    let bg_end = if wnd_visible {
        wnd_x.clamp(0, SCR_WIDTH as i32) as usize
    } else {
        SCR_WIDTH
    };

    let map = if state.lcdc & LCDC_BG_TILEMAP != 0 {
        VRAM_BGMAP1
    } else {
        VRAM_BGMAP0
    };
    let row = ly.wrapping_add(state.scy);
    for (x, e) in enc.iter_mut().enumerate().take(bg_end) {
        let col = (x as u8).wrapping_add(state.scx);
        *e = ENC_BG | tile_pixel(state, map, base, xor, col, row);
    }

    if wnd_visible {
        let map = if state.lcdc & LCDC_WND_TILEMAP != 0 {
            VRAM_BGMAP1
        } else {
            VRAM_BGMAP0
        };
        let row = ly - state.wy;
        for (x, e) in enc.iter_mut().enumerate().skip(bg_end) {
            let col = (x - bg_end) as u8;
            *e = ENC_BG | tile_pixel(state, map, base, xor, col, row);
        }
    }
}

/// Fetch one 2-bit color index from a tile map position.
fn tile_pixel(state: &PpuState, map: usize, base: usize, xor: u8, col: u8, row: u8) -> u8 {
    let map_idx = map + (row as usize / 8) * TILES_PER_MAP_ROW + col as usize / 8;
    let tile = (state.vram[map_idx] ^ xor) as usize;
    let addr = base + tile * TILE_SIZE + (row as usize % 8) * 2;
    let bit = 7 - (col % 8);
    (((state.vram[addr + 1] >> bit) & 1) << 1) | ((state.vram[addr] >> bit) & 1)
}

/// Encode the line's objects on top of the BG layer.
fn encode_objs(state: &PpuState, ly: u8, enc: &mut [u8; SCR_WIDTH]) {
    let height: u8 = if state.lcdc & LCDC_OBJ_SIZE != 0 { 16 } else { 8 };

    // Select up to 10 intersecting objects in OAM order.
    let mut objs = [0usize; MAX_OBJS_PER_LINE];
    let mut count = 0;
    for i in 0..40 {
        let y = state.oam[i * 4];
        if (ly + OBJ_YOFF).wrapping_sub(y) < height {
            objs[count] = i;
            count += 1;
            if count == MAX_OBJS_PER_LINE {
                break;
            }
        }
    }
    let objs = &mut objs[..count];
    // DMG draw priority: ascending X, OAM order on ties (the sort is
    // stable, so ties keep their selection order).
    objs.sort_by_key(|&i| state.oam[i * 4 + 1]);

    // With the BG layer disabled it yields priority wholesale.
    let bg_yields = state.lcdc & LCDC_BG_ENABLED == 0;

    for &i in objs.iter() {
        let y = state.oam[i * 4];
        let x = state.oam[i * 4 + 1];
        let mut tile = state.oam[i * 4 + 2];
        let attr = state.oam[i * 4 + 3];

        let mut row = ly + OBJ_YOFF - y;
        if attr & ATTR_YFLIP != 0 {
            row = height - 1 - row;
        }
        if height == 16 {
            // Tall objects use an aligned tile pair; rows 8-15 spill into
            // the odd tile via the row offset.
            tile &= 0xFE;
        }
        let addr = tile as usize * TILE_SIZE + row as usize * 2;
        let (lo, hi) = (state.vram[addr], state.vram[addr + 1]);
        let palette = (attr & ATTR_DMGPAL) >> 4;

        for px in 0..8u8 {
            let sx = x as i32 - OBJ_XOFF + px as i32;
            if !(0..SCR_WIDTH as i32).contains(&sx) {
                continue;
            }
            let bit = if attr & ATTR_XFLIP != 0 { px } else { 7 - px };
            let color = (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1);
            if color == 0 {
                continue;
            }
            let e = enc[sx as usize];
            if e & ENC_PALETTE_TYPE == 0 {
                // An earlier (higher-priority) object already owns this
                // pixel.
                continue;
            }
            let wins = bg_yields
                || (attr & ATTR_BGPRIORITY == 0 && e & ENC_PRIORITY == 0)
                || e & ENC_COLOR == 0;
            if wins {
                enc[sx as usize] = ENC_OBJ | (palette << 2) | color;
            }
        }
    }
}

/// Expand the three DMG palette registers into an ARGB lookup table.
fn resolve_palettes(state: &PpuState, colors: &[u32; 4]) -> [u32; 12] {
    let mut palettes = [0u32; 12];
    for (p, &reg) in [state.obp0, state.obp1, state.bgp].iter().enumerate() {
        for c in 0..4 {
            palettes[p * 4 + c] = colors[((reg >> (c * 2)) & 0x03) as usize];
        }
    }
    palettes
}
