//! Fixed timestep simulation tick
//!
//! One call per nominal 50 ms period. The pipeline while Playing:
//! spawn run (half rate), collision passes, descent motion, animation
//! (half rate), shot pruning and auto-fire (half rate), pickup cadence.
//! Other phases only count the tick.

use rand::Rng;

use super::collision;
use super::events::GameEvent;
use super::powerup::{PowerUp, PowerUpKind, POWERUP_SIZE};
use super::spawn;
use super::state::{GameState, Phase};
use crate::consts::POWERUP_INTERVAL_MS;

/// Advance the game by one tick. `dt_ms` is the nominal period the runner
/// holds; play time accrues by it only while Playing, so difficulty and the
/// pickup cadence freeze under a pause.
pub fn advance(state: &mut GameState, dt_ms: u64) {
    if state.phase == Phase::Playing {
        play_tick(state, dt_ms);
    }
    state.tick += 1;
}

fn play_tick(state: &mut GameState, dt_ms: u64) {
    // The avatar's death run finished on an earlier tick
    if !state.avatar.entity.visible {
        state.enter_phase(Phase::Over);
        log::info!("game over: {} points", state.score);
        return;
    }

    state.play_time_ms += dt_ms;
    let half_rate = state.tick % 2 == 0;
    let field = state.field;

    if half_rate {
        spawn::refresh_hostiles(state);
    }

    state.score += collision::projectile_pass(
        &mut state.projectiles,
        &mut state.hostiles,
        &mut state.events,
    );
    state.score += collision::avatar_pass(&mut state.avatar, &mut state.hostiles, &mut state.events);
    collision::powerup_pass(&mut state.avatar, &mut state.powerup, &mut state.events);

    for hostile in state.hostiles.iter_mut() {
        hostile.fall(field.height);
    }
    if let Some(pickup) = state.powerup.as_mut() {
        pickup.fall(field.height);
    }

    if half_rate {
        state.avatar.advance_animation();
        for hostile in state.hostiles.iter_mut() {
            hostile.advance_animation();
        }
    }

    state.projectiles.prune();
    if half_rate && state.avatar.fire(&mut state.projectiles) {
        state.events.push(GameEvent::ProjectileFired);
    }

    if state.play_time_ms % POWERUP_INTERVAL_MS == 0 {
        drop_powerup(state);
    }
}

/// Place a fresh pickup above the top edge, replacing any live one.
/// A 16-bit draw picks the kind (low bit) and the entry column (the rest).
fn drop_powerup(state: &mut GameState) {
    let r = u32::from(state.rng.random::<u16>());
    let kind = if r & 0x1 == 0 {
        PowerUpKind::RapidFire
    } else {
        PowerUpKind::Bomb
    };
    let span = (state.field.width - POWERUP_SIZE.x) as u32;
    let x = ((r >> 1) % span) as i32;
    state.powerup = Some(PowerUp::new(kind, x));
    log::debug!("pickup {kind:?} at x {x}");
}
