use std::time::{Duration, Instant};

use dotmatrix_core::machine::Machine;
use log::error;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::input::KeyMap;
use crate::video::Video;

/// 59.7 frames per second.
const NSEC_PER_FRAME: u64 = 16_742_706;

pub fn run(machine: &mut dyn Machine, key_map: &KeyMap, ff_key: Option<Scancode>, scale: u32) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "dotmatrix", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let mut framebuffer = vec![0u32; (width * height) as usize];
    let frame = Duration::from_nanos(NSEC_PER_FRAME);
    let mut deadline = Instant::now() + frame;
    let mut fast_forward = false;

    'main: loop {
        // Poll all pending SDL events, translate to machine input
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if Some(sc) == ff_key {
                        fast_forward = true;
                    } else if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if Some(sc) == ff_key {
                        fast_forward = false;
                    } else if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }

                _ => {}
            }
        }

        // Run one frame of emulation and present it. A dropped frame is
        // reported but never stops emulation.
        machine.run_frame();
        machine.render_frame(&mut framebuffer);
        if let Err(e) = video.present(&framebuffer) {
            error!("frame sink: {e}");
        }

        // Pace to the DMG's 59.7 Hz. Fast-forward skips the sleep; a
        // frame that is already behind schedule runs immediately and
        // re-anchors the deadline instead of trying to catch up.
        let now = Instant::now();
        if !fast_forward && now < deadline {
            std::thread::sleep(deadline - now);
        }
        deadline += frame;
        if deadline < Instant::now() {
            deadline = Instant::now() + frame;
        }
    }
}
