//! Wall-clock session loop
//!
//! Owns pacing and the input queue; the simulation itself stays pure. Each
//! pass drains every queued command, advances one tick, hands events and a
//! fresh snapshot to the hooks, then sleeps whatever is left of the nominal
//! period. A slow tick just starts the next one late; there is no catch-up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crate::consts::TICK_MS;
use crate::sim::{Command, FrameSnapshot, GameEvent, GameState, advance};

/// Per-tick callbacks for the render/audio side
pub trait SessionHooks {
    /// Fresh snapshot after each tick
    fn on_frame(&mut self, _snapshot: &FrameSnapshot) {}
    /// Every event the tick produced, in order
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Hooks that ignore everything (headless runs, tests)
impl SessionHooks for () {}

/// Drive the simulation at the nominal period until the stop flag is set,
/// quit is confirmed from the menu, or the input side hangs up. The flag is
/// checked only at tick boundaries, so a surface teardown never interrupts
/// a tick halfway.
pub fn run_session(
    state: &mut GameState,
    commands: &Receiver<Command>,
    stop: &AtomicBool,
    hooks: &mut dyn SessionHooks,
) {
    let period = Duration::from_millis(TICK_MS);
    log::info!("session loop started, {TICK_MS} ms period");
    loop {
        if stop.load(Ordering::Relaxed) {
            log::info!("session loop stopped");
            return;
        }
        let tick_start = Instant::now();

        let mut input_open = true;
        loop {
            match commands.try_recv() {
                Ok(command) => state.apply(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    input_open = false;
                    break;
                }
            }
        }

        advance(state, TICK_MS);

        for event in state.drain_events() {
            hooks.on_event(&event);
        }
        hooks.on_frame(&FrameSnapshot::capture(state));

        if state.exit_requested() {
            log::info!("exit requested, session loop done");
            return;
        }
        if !input_open {
            log::info!("input queue hung up, session loop done");
            return;
        }

        // Sleep only the remainder of the period
        let elapsed = tick_start.elapsed();
        if elapsed < period {
            std::thread::sleep(period - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use crate::sim::{Button, Phase, Playfield};
    use std::sync::mpsc;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        events: Vec<GameEvent>,
    }

    impl SessionHooks for Recorder {
        fn on_frame(&mut self, _snapshot: &FrameSnapshot) {
            self.frames += 1;
        }

        fn on_event(&mut self, event: &GameEvent) {
            self.events.push(*event);
        }
    }

    fn fresh_state() -> GameState {
        GameState::new(Playfield::new(FIELD_WIDTH, FIELD_HEIGHT), 1).unwrap()
    }

    #[test]
    fn test_preset_stop_flag_means_no_work() {
        let mut state = fresh_state();
        let (_commands, queue) = mpsc::channel();
        let stop = AtomicBool::new(true);
        run_session(&mut state, &queue, &stop, &mut ());
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_hangup_ends_the_loop_after_one_tick() {
        let mut state = fresh_state();
        let (commands, queue) = mpsc::channel();
        commands.send(Command::Press(Button::Start)).unwrap();
        drop(commands);
        let stop = AtomicBool::new(false);
        let mut recorder = Recorder::default();
        run_session(&mut state, &queue, &stop, &mut recorder);
        assert_eq!(state.tick, 1);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(recorder.frames, 1);
    }

    #[test]
    fn test_confirmed_quit_ends_the_loop() {
        let mut state = fresh_state();
        let (commands, queue) = mpsc::channel();
        commands.send(Command::Press(Button::Quit)).unwrap();
        commands.send(Command::Press(Button::QuitConfirm)).unwrap();
        let stop = AtomicBool::new(false);
        let mut recorder = Recorder::default();
        run_session(&mut state, &queue, &stop, &mut recorder);
        assert!(state.exit_requested());
        assert_eq!(state.tick, 1);
        assert_eq!(recorder.events, vec![GameEvent::ExitRequested]);
        drop(commands);
    }
}
