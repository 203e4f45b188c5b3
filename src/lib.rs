//! Sky Raid: deterministic core of a vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Pure, seeded simulation (state machine, spawning, collision)
//! - `runner`: Fixed-period session loop feeding snapshots and events to
//!   whatever renderer and audio sit on top
//!
//! The crate draws nothing and plays nothing. Once per 50 ms tick it turns
//! queued input into state, then flattens the state into a `FrameSnapshot`.

pub mod runner;
pub mod sim;

pub use runner::{SessionHooks, run_session};
pub use sim::{Command, FrameSnapshot, GameEvent, GameState, Phase, Playfield, advance};

/// Game tuning constants
pub mod consts {
    /// Nominal simulation period in milliseconds (20 Hz arcade cadence)
    pub const TICK_MS: u64 = 50;

    /// Default portrait playfield in pixels
    pub const FIELD_WIDTH: i32 = 480;
    pub const FIELD_HEIGHT: i32 = 800;

    /// Micro-steps per projectile collision pass
    pub const COLLISION_STEPS: u32 = 7;

    /// Play time between pickup drops (ms)
    pub const POWERUP_INTERVAL_MS: u64 = 30_000;

    /// Volleys granted by a rapid-fire pickup
    pub const RAPID_FIRE_VOLLEYS: u32 = 200;

    /// Horizontal offset of each double-gun shot from center (px)
    pub const DOUBLE_GUN_SPREAD: i32 = 15;

    /// Vertical stagger per volley (px) and the cycle it wraps in
    pub const FIRE_STAGGER_STEP: i32 = 25;
    pub const FIRE_STAGGER_CYCLE: u32 = 6;
}
