//! Hostile craft: three kinds with fixed metrics and per-kind recycle pools
//!
//! A hostile falls straight down at a fixed per-tick speed. Damage first
//! shows the hit-flash frame; the killing hit starts the death run, and the
//! craft stays on screen (and keeps counting toward concurrency caps) until
//! the run finishes and it goes invisible.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};

/// Hostile class, decided by two bits of the spawn draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    /// Small escort, dies to a single hit
    Light,
    /// Mid fighter
    Medium,
    /// Slow capital craft
    Heavy,
}

impl HostileKind {
    pub const ALL: [HostileKind; 3] = [HostileKind::Light, HostileKind::Medium, HostileKind::Heavy];

    /// Kind from a 2-bit draw slice; 0 doubles up on Light
    pub fn from_slice(bits: u32) -> Self {
        match bits & 0x3 {
            0 | 1 => HostileKind::Light,
            2 => HostileKind::Medium,
            _ => HostileKind::Heavy,
        }
    }

    /// Visual frame size in pixels
    pub fn size(self) -> IVec2 {
        match self {
            HostileKind::Light => IVec2::new(50, 40),
            HostileKind::Medium => IVec2::new(80, 100),
            HostileKind::Heavy => IVec2::new(170, 260),
        }
    }

    /// Collision rectangle, tighter than the frame
    pub fn hit_box(self) -> Rect {
        match self {
            HostileKind::Light => Rect::new(5, 10, 45, 30),
            HostileKind::Medium => Rect::new(15, 15, 50, 70),
            HostileKind::Heavy => Rect::new(20, 20, 130, 220),
        }
    }

    pub fn flight_frames(self) -> &'static [u16] {
        match self {
            HostileKind::Light => &[0],
            HostileKind::Medium => &[0, 1],
            HostileKind::Heavy => &[0, 1, 2],
        }
    }

    pub fn death_frames(self) -> &'static [u16] {
        match self {
            HostileKind::Light => &[1, 2, 3, 4, 4],
            HostileKind::Medium => &[2, 3, 4, 5, 5],
            HostileKind::Heavy => &[3, 4, 5, 6, 7, 8, 8],
        }
    }

    /// Flight-sequence index shown right after taking a hit. Zero means the
    /// kind has no dedicated flash frame.
    pub fn hit_flash_index(self) -> usize {
        match self {
            HostileKind::Light => 0,
            HostileKind::Medium => 1,
            HostileKind::Heavy => 2,
        }
    }

    pub fn base_hp(self) -> u32 {
        match self {
            HostileKind::Light => 1,
            HostileKind::Medium => 15,
            HostileKind::Heavy => 40,
        }
    }

    /// Points credited when the craft reaches zero hp
    pub fn score(self) -> u32 {
        match self {
            HostileKind::Light => 100,
            HostileKind::Medium => 500,
            HostileKind::Heavy => 1000,
        }
    }

    /// Descent speed in pixels per tick for a speed tier (1 to 3)
    pub fn speed_for_tier(self, tier: u32) -> i32 {
        let tier = tier as i32;
        match self {
            HostileKind::Light => 2 + 6 * tier,
            HostileKind::Medium => 2 + 4 * tier,
            HostileKind::Heavy => 1 + 3 * tier,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One hostile craft
#[derive(Debug, Clone)]
pub struct Hostile {
    pub kind: HostileKind,
    pub entity: Entity,
    hp: u32,
    alive: bool,
    speed: i32,
}

impl Hostile {
    pub fn new(kind: HostileKind) -> Self {
        Self {
            kind,
            entity: Entity::new(kind.size(), kind.flight_frames(), kind.hit_box()),
            hp: kind.base_hp(),
            alive: true,
            speed: 0,
        }
    }

    /// Dead craft are still visible while their death run plays
    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Reset a pooled craft for a fresh descent
    pub fn revive(&mut self, speed: i32, pos: IVec2) {
        self.hp = self.kind.base_hp();
        self.alive = true;
        self.speed = speed;
        self.entity.pos = pos;
        self.entity.set_sequence(self.kind.flight_frames());
        self.entity.visible = true;
    }

    /// Apply one hit of damage. Shows the flash frame, and on the killing
    /// hit switches to the death run. Returns true exactly once per life,
    /// on that killing hit.
    pub fn hit(&mut self) -> bool {
        if !self.alive || !self.entity.visible {
            return false;
        }
        self.entity.set_cursor(self.kind.hit_flash_index());
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
            self.entity.set_sequence(self.kind.death_frames());
            return true;
        }
        false
    }

    /// Bomb kill: straight to the death run, no flash, whatever the hp was
    pub fn bombed(&mut self) {
        if !self.alive || !self.entity.visible {
            return;
        }
        self.hp = 0;
        self.alive = false;
        self.entity.set_sequence(self.kind.death_frames());
    }

    /// Per-tick descent while flying; a wreck holds position through its
    /// death run. Leaving the bottom edge hides the craft.
    pub fn fall(&mut self, field_height: i32) {
        if !self.alive || !self.entity.visible {
            return;
        }
        self.entity.pos.y += self.speed;
        if self.entity.pos.y > field_height {
            self.entity.visible = false;
        }
    }

    /// Half-rate animation step. Normal cycling skips the hit-flash frame,
    /// so it only ever shows right after a hit. A finished death run hides
    /// the craft.
    pub fn advance_animation(&mut self) {
        if !self.entity.visible {
            return;
        }
        self.entity.step_cursor();
        if self.alive {
            let flash = self.kind.hit_flash_index();
            if flash != 0 && self.entity.cursor() == flash {
                self.entity.step_cursor();
            }
        } else if self.entity.at_sequence_end() {
            self.entity.visible = false;
        }
    }
}

/// Live hostiles plus per-kind recycle pools
#[derive(Debug, Clone, Default)]
pub struct HostileSet {
    live: Vec<Hostile>,
    pools: [Vec<Hostile>; 3],
}

impl HostileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live craft in spawn order, dying ones included
    pub fn iter(&self) -> impl Iterator<Item = &Hostile> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hostile> {
        self.live.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live craft of one kind, dying-but-visible ones included
    pub fn count(&self, kind: HostileKind) -> usize {
        self.live.iter().filter(|h| h.kind == kind).count()
    }

    pub fn pooled(&self, kind: HostileKind) -> usize {
        self.pools[kind.index()].len()
    }

    /// Move every invisible craft into its kind's pool, keeping spawn order
    pub fn prune(&mut self) {
        let mut i = 0;
        while i < self.live.len() {
            if self.live[i].entity.visible {
                i += 1;
            } else {
                let hostile = self.live.remove(i);
                self.pools[hostile.kind.index()].push(hostile);
            }
        }
    }

    /// Revive a pooled craft of `kind`, or build one if the pool is dry,
    /// starting just above the top edge
    pub fn spawn(&mut self, kind: HostileKind, speed: i32, x: i32) {
        let mut hostile = self.pools[kind.index()]
            .pop()
            .unwrap_or_else(|| Hostile::new(kind));
        hostile.revive(speed, IVec2::new(x, -kind.size().y));
        self.live.push(hostile);
    }

    /// Hide everything and recycle it (session reset)
    pub fn clear_all(&mut self) {
        for hostile in &mut self.live {
            hostile.entity.visible = false;
        }
        self.prune();
    }
}
