use std::fs;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use clock::Clock;
use emulator::{Emulator, Quirks};
use keyboard::Layout;
use sound::Beeper;
use window::Screen;

mod clock;
mod decode;
mod display;
mod emulator;
mod error;
mod keyboard;
mod memory;
mod registers;
mod sound;
mod timer;
mod window;

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 virtual machine")]
struct Args {
    /// Path to the ROM image to run
    rom: String,

    /// Instruction rate in instructions per second
    #[arg(long, default_value_t = clock::DEFAULT_IPS)]
    ips: u32,

    /// 8xy6/8xyE copy Vy into Vx before shifting (COSMAC VIP behavior)
    #[arg(long)]
    shift_quirk: bool,

    /// Map the hex pad onto the number pad instead of the QWERTY block
    #[arg(long)]
    numpad: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = fs::read(&args.rom).with_context(|| format!("reading rom {}", args.rom))?;
    let mut emu = Emulator::new(Quirks {
        shift_reads_vy: args.shift_quirk,
    });
    emu.load_rom(&image)?;
    info!("loaded {} byte rom from {}", image.len(), args.rom);

    let layout = if args.numpad {
        Layout::Numpad
    } else {
        Layout::Qwerty
    };
    let mut screen = Screen::new(layout)?;
    let mut beeper = Beeper::new()?;
    let mut clock = Clock::new(args.ips);

    let mut last = Instant::now();
    while screen.is_open() {
        screen.pump_keys(&mut emu);

        let now = Instant::now();
        let batch = clock.advance(now - last);
        last = now;

        for _ in 0..batch.cycles {
            emu.step().context("emulation halted")?;
        }
        for _ in 0..batch.timer_ticks {
            emu.tick_timers();
        }

        beeper.set_beeping(emu.beeping())?;
        screen.refresh(&mut emu)?;

        // nothing can become due before this
        thread::sleep(clock.until_next_due());
    }

    Ok(())
}
