//! Time-scaled hostile spawning
//!
//! Runs on the half-rate cadence. One 24-bit draw per run decides everything
//! from independent bit slices: the low byte gates the spawn against a
//! difficulty weight, two bits pick the kind, two more the speed tier, and
//! the rest the entry column. Difficulty scales with accumulated play time
//! through banded weights, concurrency caps and tier caps.

use rand::Rng;

use super::hostile::HostileKind;
use super::state::{GameState, Playfield};

/// Difficulty parameters for a moment of play time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTuning {
    /// Spawn chance numerator, out of 256 per run
    pub weight: u32,
    /// Concurrent Medium craft allowed, dying ones included
    pub max_medium: usize,
    /// Concurrent Heavy craft allowed
    pub max_heavy: usize,
    /// Highest speed tier per kind
    pub light_tier_cap: u32,
    pub medium_tier_cap: u32,
    pub heavy_tier_cap: u32,
}

impl SpawnTuning {
    /// Band tables keyed on elapsed play time
    pub fn at(play_time_ms: u64) -> Self {
        let t = play_time_ms;
        Self {
            weight: match t {
                t if t < 20_000 => 30,
                t if t < 60_000 => 50,
                t if t < 240_000 => 70,
                t if t < 6_000_000 => 80,
                _ => 90,
            },
            max_medium: match t {
                t if t < 10_000 => 0,
                t if t < 60_000 => 1,
                t if t < 180_000 => 2,
                t if t < 360_000 => 3,
                t if t < 720_000 => 4,
                _ => 5,
            },
            max_heavy: match t {
                t if t < 20_000 => 0,
                t if t < 600_000 => 1,
                _ => 2,
            },
            light_tier_cap: match t {
                t if t < 20_000 => 1,
                t if t < 60_000 => 2,
                _ => 3,
            },
            medium_tier_cap: match t {
                t if t < 60_000 => 1,
                t if t < 300_000 => 2,
                _ => 3,
            },
            heavy_tier_cap: match t {
                t if t < 240_000 => 1,
                _ => 2,
            },
        }
    }

    fn tier_cap(&self, kind: HostileKind) -> u32 {
        match kind {
            HostileKind::Light => self.light_tier_cap,
            HostileKind::Medium => self.medium_tier_cap,
            HostileKind::Heavy => self.heavy_tier_cap,
        }
    }
}

/// What one draw resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpawnPlan {
    kind: HostileKind,
    speed: i32,
    x: i32,
}

/// Resolve a raw 24-bit draw against the tuning and current population.
/// A kind over its concurrency cap demotes to Light; a tier of zero or one
/// past the kind's cap collapses to tier 1.
fn plan(r: u32, tuning: &SpawnTuning, medium: usize, heavy: usize, field: Playfield) -> Option<SpawnPlan> {
    if (r & 0xFF) >= tuning.weight {
        return None;
    }
    let mut kind = HostileKind::from_slice(r >> 8);
    if (kind == HostileKind::Medium && medium >= tuning.max_medium)
        || (kind == HostileKind::Heavy && heavy >= tuning.max_heavy)
    {
        kind = HostileKind::Light;
    }
    let mut tier = (r >> 10) & 0x3;
    if tier == 0 || tier > tuning.tier_cap(kind) {
        tier = 1;
    }
    let span = (field.width - kind.size().x) as u32;
    let x = ((r >> 12) % span) as i32;
    Some(SpawnPlan {
        kind,
        speed: kind.speed_for_tier(tier),
        x,
    })
}

/// One spawn run: recycle the dead, then maybe add a single hostile.
/// Returns the kind that spawned, if any.
pub fn refresh_hostiles(state: &mut GameState) -> Option<HostileKind> {
    state.hostiles.prune();
    let tuning = SpawnTuning::at(state.play_time_ms);
    let r = state.rng.random::<u32>() & 0x00FF_FFFF;
    let medium = state.hostiles.count(HostileKind::Medium);
    let heavy = state.hostiles.count(HostileKind::Heavy);
    let plan = plan(r, &tuning, medium, heavy, state.field)?;
    state.hostiles.spawn(plan.kind, plan.speed, plan.x);
    log::debug!("hostile {:?} speed {} at x {}", plan.kind, plan.speed, plan.x);
    Some(plan.kind)
}
