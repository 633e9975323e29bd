use std::fs;
use std::time::{Duration, Instant};

use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use ocho::{Chip8, Step, CLOCK_SPEED};

mod display;

fn main() {
    env_logger::init();

    let rom_path = std::env::args()
        .nth(1)
        .expect("expected ROM file path but got no arguments");
    let rom = fs::read(&rom_path).expect("unable to read ROM file");

    let mut chip8 = Chip8::new();
    if let Err(e) = chip8.load_program(&rom) {
        error!("failed to load {}: {}", rom_path, e);
        std::process::exit(1);
    }
    info!("loaded {}", rom_path);

    // Get SDL2 context
    let sdl = sdl2::init().unwrap();
    let mut display = display::Display::new(&sdl, 10);
    let mut events = sdl.event_pump().unwrap();

    // Set initial timing
    let cycle_time = Duration::new(0, CLOCK_SPEED);
    let mut last_cycle = Instant::now();

    'event: loop {
        // If a new frame is available, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame);
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                _ => continue,
            }
        }

        match chip8.step() {
            Ok(Step::Running) => {}
            Ok(Step::Halted) => break,
            Err(e) => {
                error!("machine fault: {}", e);
                break;
            }
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }

    // Stop the ticker before printing the final state
    chip8.stop();
    println!("{}", chip8);
}
