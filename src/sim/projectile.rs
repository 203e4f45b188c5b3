//! Avatar projectiles
//!
//! Shots climb the field in micro-steps of their own height, which is what
//! lets the collision pass test contact at every step instead of once per
//! tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};

/// Frame size shared by both shot sheets
pub const PROJECTILE_SIZE: IVec2 = IVec2::new(10, 24);

/// Shot flavor; Double comes in pairs while rapid fire lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Single,
    Double,
}

impl ProjectileKind {
    pub fn frames(self) -> &'static [u16] {
        match self {
            ProjectileKind::Single => &[0],
            ProjectileKind::Double => &[1],
        }
    }
}

/// One shot in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub entity: Entity,
}

impl Projectile {
    /// One micro-step of flight; leaving the top edge hides the shot
    pub fn step(&mut self) {
        if !self.entity.visible {
            return;
        }
        self.entity.pos.y -= self.entity.size.y;
        if self.entity.pos.y < -self.entity.size.y {
            self.entity.visible = false;
        }
    }
}

/// All shots in flight, in firing order
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    shots: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh shot at `pos`. Shots collide over their full frame.
    pub fn spawn(&mut self, kind: ProjectileKind, pos: IVec2) {
        let mut entity = Entity::new(
            PROJECTILE_SIZE,
            kind.frames(),
            Rect::new(0, 0, PROJECTILE_SIZE.x, PROJECTILE_SIZE.y),
        );
        entity.pos = pos;
        self.shots.push(Projectile { kind, entity });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.shots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.shots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Drop shots that burned out or left the screen
    pub fn prune(&mut self) {
        self.shots.retain(|shot| shot.entity.visible);
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }
}
