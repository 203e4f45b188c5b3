//! Discrete per-tick events for external collaborators (audio, shell)

use serde::{Deserialize, Serialize};

use super::hostile::HostileKind;
use super::powerup::PowerUpKind;

/// One thing that happened during a tick, in occurrence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A hostile reached zero hp and started its death run
    HostileDestroyed { kind: HostileKind },
    /// The avatar was downed by contact
    AvatarKnockedOut,
    PowerUpCollected { kind: PowerUpKind },
    /// One volley left the avatar's guns
    ProjectileFired,
    /// A bomb charge went off (bombed hostiles emit no individual events)
    BombUsed,
    /// Quit confirmed from the menu; the shell should terminate
    ExitRequested,
}
