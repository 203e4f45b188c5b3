//! Screen state machine and the complete game state
//!
//! Input tokens route through `GameState::apply`; everything time-driven
//! happens in `tick::advance`. State transitions that an input cannot make
//! from the current phase are plain no-ops, never errors.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::avatar::Avatar;
use super::events::GameEvent;
use super::hostile::{HostileKind, HostileSet};
use super::powerup::{PowerUp, POWERUP_SIZE};
use super::projectile::ProjectileSet;

/// Current screen phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Menu shown, no sprites on screen
    Idle,
    /// Simulation running
    Playing,
    /// Simulation frozen under a menu overlay
    Paused,
    /// Final score shown, waiting for acknowledgement
    Over,
}

/// Pending two-outcome confirmation. While one is open it is modal: only
/// its confirm/cancel tokens (or the back token) do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// "Restart the session?"
    Restart,
    /// "Quit?" (to the menu from a pause, out of the program from the menu)
    Quit,
}

/// Abstract button tokens from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Start,
    Pause,
    Resume,
    Restart,
    RestartConfirm,
    RestartCancel,
    Quit,
    QuitConfirm,
    QuitCancel,
    Bomb,
    Acknowledge,
}

/// One queued input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Drag delta; only pointer 0 steers the avatar
    Move { pointer: u8, delta: IVec2 },
    Press(Button),
    /// Hardware back token; its meaning depends on the phase
    Back,
}

/// Pixel dimensions of the portrait playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Every sprite must fit with room to spare, or spawn columns and the
    /// avatar's park position would go negative
    fn check(self) -> Result<(), GameError> {
        let mut need = Avatar::SIZE.max(POWERUP_SIZE);
        for kind in HostileKind::ALL {
            need = need.max(kind.size());
        }
        if self.width <= need.x || self.height <= need.y {
            return Err(GameError::FieldTooSmall {
                width: self.width,
                height: self.height,
                need_w: need.x,
                need_h: need.y,
            });
        }
        Ok(())
    }
}

/// Construction-time validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The field cannot contain the largest sprite
    #[error("playfield {width}x{height} is too small, sprites need more than {need_w}x{need_h}")]
    FieldTooSmall {
        width: i32,
        height: i32,
        need_w: i32,
        need_h: i32,
    },
}

/// The complete game state. Everything the simulation knows lives here;
/// rendering and audio consume snapshots and events instead of reaching in.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Playfield,
    /// Seed the RNG started from, kept for reproducing runs
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Counts every tick in every phase; half-rate effects run on even ones
    pub tick: u64,
    /// Accrues only while Playing; drives the difficulty bands
    pub play_time_ms: u64,
    pub score: u64,
    pub phase: Phase,
    pub prompt: Option<Prompt>,
    pub avatar: Avatar,
    pub hostiles: HostileSet,
    pub projectiles: ProjectileSet,
    /// At most one pickup at a time; a new drop replaces it
    pub powerup: Option<PowerUp>,
    pub(crate) events: Vec<GameEvent>,
    exit_requested: bool,
}

impl GameState {
    /// Fresh state in the menu phase. Fails if the field cannot hold the
    /// sprites; there is no way to recover from that at runtime.
    pub fn new(field: Playfield, seed: u64) -> Result<Self, GameError> {
        field.check()?;
        log::info!(
            "new game: {}x{} field, seed {seed}",
            field.width,
            field.height
        );
        Ok(Self {
            field,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            play_time_ms: 0,
            score: 0,
            phase: Phase::Idle,
            prompt: None,
            avatar: Avatar::new(),
            hostiles: HostileSet::new(),
            projectiles: ProjectileSet::new(),
            powerup: None,
            events: Vec::new(),
            exit_requested: false,
        })
    }

    /// Route one input token. Tokens that mean nothing in the current
    /// phase fall through silently.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move { pointer, delta } => {
                if pointer == 0 && self.phase == Phase::Playing {
                    self.avatar.slide(delta, self.field.size());
                }
            }
            Command::Press(button) => self.press(button),
            Command::Back => self.back(),
        }
    }

    /// True once quitting from the menu was confirmed; sticky
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Take the events the ticks since the last drain produced, in order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn press(&mut self, button: Button) {
        if let Some(prompt) = self.prompt {
            match (prompt, button) {
                (Prompt::Restart, Button::RestartConfirm) => {
                    self.prompt = None;
                    self.start_session();
                }
                (Prompt::Restart, Button::RestartCancel) => self.prompt = None,
                (Prompt::Quit, Button::QuitConfirm) => {
                    self.prompt = None;
                    self.quit_confirmed();
                }
                (Prompt::Quit, Button::QuitCancel) => self.prompt = None,
                _ => {}
            }
            return;
        }
        match (self.phase, button) {
            (Phase::Idle, Button::Start) => self.start_session(),
            (Phase::Idle, Button::Quit) => self.prompt = Some(Prompt::Quit),
            (Phase::Playing, Button::Pause) => self.enter_phase(Phase::Paused),
            (Phase::Playing, Button::Bomb) => self.use_bomb(),
            (Phase::Paused, Button::Resume) => self.enter_phase(Phase::Playing),
            (Phase::Paused, Button::Restart) => self.prompt = Some(Prompt::Restart),
            (Phase::Paused, Button::Quit) => self.prompt = Some(Prompt::Quit),
            (Phase::Over, Button::Acknowledge) => self.enter_phase(Phase::Idle),
            _ => {}
        }
    }

    /// Hardware back: quit prompt from the menu, pause from play, cancel a
    /// restart prompt (else open a quit prompt) from a pause, acknowledge
    /// from the final-score screen
    fn back(&mut self) {
        match self.phase {
            Phase::Idle => self.prompt = Some(Prompt::Quit),
            Phase::Playing => self.enter_phase(Phase::Paused),
            Phase::Paused => {
                if self.prompt == Some(Prompt::Restart) {
                    self.prompt = None;
                } else {
                    self.prompt = Some(Prompt::Quit);
                }
            }
            Phase::Over => self.enter_phase(Phase::Idle),
        }
    }

    fn quit_confirmed(&mut self) {
        match self.phase {
            Phase::Idle => {
                self.exit_requested = true;
                self.events.push(GameEvent::ExitRequested);
            }
            Phase::Paused => self.enter_phase(Phase::Idle),
            _ => {}
        }
    }

    /// Start or restart: zero the session, park the avatar, recycle the
    /// whole population. The first hostile arrives through a spawn run,
    /// never instantly.
    fn start_session(&mut self) {
        self.score = 0;
        self.play_time_ms = 0;
        self.avatar.revive(self.field.size());
        self.hostiles.clear_all();
        self.projectiles.clear();
        self.powerup = None;
        self.enter_phase(Phase::Playing);
        log::info!("session started");
    }

    /// Spend a bomb charge: every live hostile on screen starts its death
    /// run and scores, in one stroke
    fn use_bomb(&mut self) {
        if !self.avatar.spend_bomb() {
            return;
        }
        let mut points = 0u64;
        for hostile in self.hostiles.iter_mut() {
            if hostile.alive() && hostile.entity.visible {
                hostile.bombed();
                points += u64::from(hostile.kind.score());
            }
        }
        self.score += points;
        self.events.push(GameEvent::BombUsed);
        log::debug!("bomb cleared the field for {points} points");
    }
}
