//! Falling pickups
//!
//! A pickup drops in on a scripted speed profile: it dives, brakes, drifts
//! back up for a beat, then commits to the bottom of the field. At most one
//! exists at a time; a new drop replaces the old one.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};

/// Frame size shared by both pickup sheets
pub const POWERUP_SIZE: IVec2 = IVec2::new(70, 110);

/// Spawn height above the top edge
pub const POWERUP_DROP_Y: i32 = -50;

const HIT_BOX: Rect = Rect::new(10, 10, 50, 90);

/// Per-tick vertical speeds; the cursor saturates on the last entry
const SPEED_PROFILE: [i32; 13] = [50, 50, 40, 25, -10, -40, -40, -35, 0, 40, 45, 50, 60];

/// What the pickup grants on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Refreshes the double-gun volley counter
    RapidFire,
    /// Adds one bomb charge
    Bomb,
}

impl PowerUpKind {
    pub fn frames(self) -> &'static [u16] {
        match self {
            PowerUpKind::RapidFire => &[0],
            PowerUpKind::Bomb => &[1],
        }
    }
}

/// One falling pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub entity: Entity,
    step: usize,
}

impl PowerUp {
    /// Fresh drop just above the top edge
    pub fn new(kind: PowerUpKind, x: i32) -> Self {
        let mut entity = Entity::new(POWERUP_SIZE, kind.frames(), HIT_BOX);
        entity.pos = IVec2::new(x, POWERUP_DROP_Y);
        Self {
            kind,
            entity,
            step: 0,
        }
    }

    /// Scripted descent; leaving the bottom edge hides the pickup
    pub fn fall(&mut self, field_height: i32) {
        if !self.entity.visible {
            return;
        }
        self.entity.pos.y += SPEED_PROFILE[self.step];
        if self.step < SPEED_PROFILE.len() - 1 {
            self.step += 1;
        }
        if self.entity.pos.y > field_height {
            self.entity.visible = false;
        }
    }
}
