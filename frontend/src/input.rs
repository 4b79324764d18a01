use std::collections::HashMap;

use dotmatrix_core::machine::InputButton;
use log::warn;
use sdl2::keyboard::Scancode;

use crate::config::Config;

/// Maps SDL scancodes to machine button IDs.
pub struct KeyMap {
    map: HashMap<Scancode, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(&mut self, scancode: Scancode, button_id: u8) {
        self.map.insert(scancode, button_id);
    }

    pub fn get(&self, scancode: Scancode) -> Option<u8> {
        self.map.get(&scancode).copied()
    }
}

/// Build the key map from the configured bindings, matched against the
/// machine's button names.
pub fn key_map(cfg: &Config, buttons: &[InputButton]) -> KeyMap {
    let mut km = KeyMap::new();
    for button in buttons {
        let name = match button.name {
            "Right" => &cfg.keys.right,
            "Left" => &cfg.keys.left,
            "Up" => &cfg.keys.up,
            "Down" => &cfg.keys.down,
            "A" => &cfg.keys.a,
            "B" => &cfg.keys.b,
            "Select" => &cfg.keys.select,
            "Start" => &cfg.keys.start,
            _ => continue,
        };
        match Scancode::from_name(name) {
            Some(scancode) => km.bind(scancode, button.id),
            None => warn!("unknown key name {name:?} for {}", button.name),
        }
    }
    km
}

/// Fast-forward is a frontend chord, not a machine button.
pub fn fast_forward_key(cfg: &Config) -> Option<Scancode> {
    let scancode = Scancode::from_name(&cfg.keys.fast_forward);
    if scancode.is_none() {
        warn!("unknown key name {:?} for fast-forward", cfg.keys.fast_forward);
    }
    scancode
}
