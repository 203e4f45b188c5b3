//! The player craft
//!
//! Steers by clamped drag deltas, auto-fires on the half-rate cadence with a
//! six-volley vertical stagger, and carries the pickup inventory.

use glam::IVec2;

use super::entity::{Entity, Rect};
use super::powerup::PowerUpKind;
use super::projectile::{ProjectileKind, ProjectileSet, PROJECTILE_SIZE};
use crate::consts::{DOUBLE_GUN_SPREAD, FIRE_STAGGER_CYCLE, FIRE_STAGGER_STEP, RAPID_FIRE_VOLLEYS};

const FLIGHT_FRAMES: &[u16] = &[0, 1];
const DEATH_FRAMES: &[u16] = &[2, 3, 4, 4];
const HIT_BOX: Rect = Rect::new(20, 20, 70, 80);

/// The one player-controlled craft
#[derive(Debug, Clone)]
pub struct Avatar {
    pub entity: Entity,
    alive: bool,
    rapid_fire: u32,
    bombs: u32,
    fire_count: u32,
}

impl Avatar {
    /// Visual frame size in pixels
    pub const SIZE: IVec2 = IVec2::new(110, 120);

    /// Starts hidden; the first session start revives it
    pub fn new() -> Self {
        let mut entity = Entity::new(Self::SIZE, FLIGHT_FRAMES, HIT_BOX);
        entity.visible = false;
        Self {
            entity,
            alive: false,
            rapid_fire: 0,
            bombs: 0,
            fire_count: 0,
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Double-gun volleys left
    pub fn rapid_fire(&self) -> u32 {
        self.rapid_fire
    }

    /// Bomb charges held
    pub fn bombs(&self) -> u32 {
        self.bombs
    }

    /// Session reset: flying again, empty inventory, parked bottom-center
    pub fn revive(&mut self, field: IVec2) {
        self.alive = true;
        self.rapid_fire = 0;
        self.bombs = 0;
        self.fire_count = 0;
        self.entity.set_sequence(FLIGHT_FRAMES);
        self.entity.visible = true;
        self.entity.pos = IVec2::new((field.x - Self::SIZE.x) / 2, field.y - Self::SIZE.y);
    }

    /// Clamped drag movement; the frame never leaves the field
    pub fn slide(&mut self, delta: IVec2, field: IVec2) {
        if !self.alive || !self.entity.visible {
            return;
        }
        let max = field - self.entity.size;
        self.entity.pos = (self.entity.pos + delta).clamp(IVec2::ZERO, max);
    }

    /// Fire one volley if flying. Rapid fire spends a volley for a double
    /// pair; otherwise one single shot. Volleys climb a six-step vertical
    /// stagger so back-to-back shots never stack on one pixel row.
    pub fn fire(&mut self, shots: &mut ProjectileSet) -> bool {
        if !self.alive || !self.entity.visible {
            return false;
        }
        let stagger = (self.fire_count % FIRE_STAGGER_CYCLE) as i32 * FIRE_STAGGER_STEP;
        let y = self.entity.pos.y - stagger - PROJECTILE_SIZE.y;
        let center = self.entity.pos.x + (self.entity.size.x - PROJECTILE_SIZE.x) / 2;
        if self.rapid_fire > 0 {
            self.rapid_fire -= 1;
            shots.spawn(ProjectileKind::Double, IVec2::new(center - DOUBLE_GUN_SPREAD, y));
            shots.spawn(ProjectileKind::Double, IVec2::new(center + DOUBLE_GUN_SPREAD, y));
        } else {
            shots.spawn(ProjectileKind::Single, IVec2::new(center, y));
        }
        self.fire_count += 1;
        true
    }

    /// Apply a pickup. Rapid fire refreshes the counter, it does not stack.
    pub fn collect(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire = RAPID_FIRE_VOLLEYS,
            PowerUpKind::Bomb => self.bombs += 1,
        }
    }

    /// Take one bomb charge if the craft is flying and holds any
    pub fn spend_bomb(&mut self) -> bool {
        if !self.alive || !self.entity.visible || self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        true
    }

    /// Contact knockout. Returns true only for the call that actually
    /// downed the craft.
    pub fn knock(&mut self) -> bool {
        if !self.alive || !self.entity.visible {
            return false;
        }
        self.alive = false;
        self.entity.set_sequence(DEATH_FRAMES);
        true
    }

    /// Half-rate animation step; a finished death run hides the craft
    pub fn advance_animation(&mut self) {
        if !self.entity.visible {
            return;
        }
        self.entity.step_cursor();
        if !self.alive && self.entity.at_sequence_end() {
            self.entity.visible = false;
        }
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}
