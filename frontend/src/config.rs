//! Optional user configuration.
//!
//! Loaded from `--config` or `<config-dir>/dotmatrix/config.toml`; any
//! missing field falls back to its default, and a missing or malformed
//! file falls back entirely.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Integer window scale.
    pub scale: u32,
    /// The four display shades, lightest first, as 0xAARRGGBB words.
    pub palette: [u32; 4],
    pub keys: Keys,
}

/// Key bindings by SDL scancode name (as shown by SDL_GetScancodeName).
#[derive(Deserialize)]
#[serde(default)]
pub struct Keys {
    pub right: String,
    pub left: String,
    pub up: String,
    pub down: String,
    pub a: String,
    pub b: String,
    pub select: String,
    pub start: String,
    pub fast_forward: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 3,
            palette: [0xFFFF_FFFF, 0xFFAA_AAAA, 0xFF55_5555, 0xFF00_0000],
            keys: Keys::default(),
        }
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            right: "Right".into(),
            left: "Left".into(),
            up: "Up".into(),
            down: "Down".into(),
            a: "Z".into(),
            b: "X".into(),
            select: "Right Shift".into(),
            start: "Return".into(),
            fast_forward: "F".into(),
        }
    }
}

pub fn load(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) => path,
            None => return Config::default(),
        },
    };
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(_) if explicit.is_none() => return Config::default(),
        Err(e) => {
            warn!("cannot read {}: {e}", path.display());
            return Config::default();
        }
    };
    match toml::from_str(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("malformed config {}: {e}", path.display());
            Config::default()
        }
    }
}

fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("dotmatrix").join("config.toml"))
}
