//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, invisible craft pruned in place)
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collision;
pub mod entity;
pub mod events;
pub mod hostile;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use entity::{Entity, Rect};
pub use events::GameEvent;
pub use hostile::{Hostile, HostileKind, HostileSet};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Projectile, ProjectileKind, ProjectileSet};
pub use snapshot::{FrameSnapshot, SpriteKind, SpriteView};
pub use spawn::{SpawnTuning, refresh_hostiles};
pub use state::{Button, Command, GameError, GameState, Phase, Playfield, Prompt};
pub use tick::advance;
