use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotmatrix_core::prelude::*;
use log::warn;

mod config;
mod emulator;
mod input;
mod rom_path;
mod video;

#[derive(Parser)]
#[command(name = "dotmatrix", about = "DMG Game Boy emulator", version)]
struct Args {
    /// ROM image (.gb, or a .zip containing one)
    rom: PathBuf,

    /// Integer window scale factor
    #[arg(long)]
    scale: Option<u32>,

    /// Config file (defaults to <config-dir>/dotmatrix/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    // clap exits with status 2 on its own; a missing argument must report
    // failure as exit 1 like every other load error. Help and version
    // requests also land here and are not failures.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let cfg = config::load(args.config.as_deref());
    let scale = args.scale.unwrap_or(cfg.scale).max(1);

    let rom = match rom_path::read_rom(&args.rom) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("dotmatrix: cannot read {}: {e}", args.rom.display());
            return ExitCode::FAILURE;
        }
    };
    let pak = match Pak::from_bytes(rom) {
        Ok(pak) => pak,
        Err(e) => {
            eprintln!("dotmatrix: cannot load {}: {e}", args.rom.display());
            return ExitCode::FAILURE;
        }
    };

    let mut gb = GameBoy::new(pak);
    gb.set_palette(cfg.palette);

    // Battery-backed RAM lives next to the ROM.
    let sav_path = args.rom.with_extension("sav");
    if let Ok(data) = std::fs::read(&sav_path) {
        gb.load_nvram(&data);
    }

    let key_map = input::key_map(&cfg, gb.input_map());
    let ff_key = input::fast_forward_key(&cfg);
    emulator::run(&mut gb, &key_map, ff_key, scale);

    // Persist external RAM on clean shutdown, only when dirty.
    if let Some(data) = gb.save_nvram()
        && let Err(e) = std::fs::write(&sav_path, data)
    {
        warn!("failed to write {}: {e}", sav_path.display());
    }
    ExitCode::SUCCESS
}
