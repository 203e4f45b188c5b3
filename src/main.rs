//! Headless demo driver
//!
//! Exercises the whole surface end to end: seeds a game, scripts an input
//! thread, runs the paced session loop, and prints one JSON snapshot line
//! per second of play. Args: `sky-raid [seed] [play-ticks]`.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use glam::IVec2;

use sky_raid::consts::{FIELD_HEIGHT, FIELD_WIDTH, TICK_MS};
use sky_raid::runner::{SessionHooks, run_session};
use sky_raid::sim::{Button, Command, FrameSnapshot, GameEvent, GameState, Playfield};

struct JsonHooks;

impl SessionHooks for JsonHooks {
    fn on_frame(&mut self, snapshot: &FrameSnapshot) {
        if snapshot.tick % 20 == 0 {
            if let Ok(line) = serde_json::to_string(snapshot) {
                println!("{line}");
            }
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        log::info!("event: {event:?}");
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().context("seed must be an unsigned integer")?,
        None => 0xCAFE,
    };
    let play_ticks: u64 = match args.next() {
        Some(raw) => raw
            .parse()
            .context("play-ticks must be an unsigned integer")?,
        None => 1200, // one minute of play
    };

    let mut state = GameState::new(Playfield::new(FIELD_WIDTH, FIELD_HEIGHT), seed)?;

    let (commands, queue) = mpsc::channel();
    let script = thread::spawn(move || feed_script(&commands, play_ticks));

    let stop = AtomicBool::new(false);
    run_session(&mut state, &queue, &stop, &mut JsonHooks);

    if script.join().is_err() {
        log::warn!("input script panicked");
    }

    let last = serde_json::to_string(&FrameSnapshot::capture(&state)).context("final snapshot")?;
    println!("{last}");
    Ok(())
}

/// Scripted "player": start, weave back and forth, drop a bomb halfway,
/// then quit out through both confirmations. If the avatar dies first the
/// wind-down tokens fall through and the hangup ends the loop instead.
fn feed_script(commands: &mpsc::Sender<Command>, play_ticks: u64) {
    let pace = Duration::from_millis(TICK_MS);
    let _ = commands.send(Command::Press(Button::Start));
    for i in 0..play_ticks {
        let dx = if (i / 40) % 2 == 0 { 6 } else { -6 };
        let _ = commands.send(Command::Move {
            pointer: 0,
            delta: IVec2::new(dx, 0),
        });
        if i == play_ticks / 2 {
            let _ = commands.send(Command::Press(Button::Bomb));
        }
        thread::sleep(pace);
    }
    for button in [
        Button::Pause,
        Button::Quit,
        Button::QuitConfirm,
        Button::Quit,
        Button::QuitConfirm,
    ] {
        let _ = commands.send(Command::Press(button));
    }
}
