//! Per-tick render handoff
//!
//! The simulation never draws; once per tick it is flattened into a
//! `FrameSnapshot` of visible sprites for whatever renderer sits on top.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::hostile::HostileKind;
use super::powerup::PowerUpKind;
use super::projectile::ProjectileKind;
use super::state::{GameState, Phase, Prompt};

/// Which sheet a sprite entry draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Avatar,
    Hostile(HostileKind),
    Projectile(ProjectileKind),
    PowerUp(PowerUpKind),
}

/// One visible sprite: sheet, top-left position, raw frame index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub pos: IVec2,
    pub frame: u16,
}

/// Everything a renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: Phase,
    pub prompt: Option<Prompt>,
    pub score: u64,
    pub bombs: u32,
    pub sprites: Vec<SpriteView>,
}

impl FrameSnapshot {
    /// Flatten the visible world, back to front: hostiles, shots, pickup,
    /// avatar on top. The menu phase shows no sprites at all.
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::new();
        if state.phase != Phase::Idle {
            for hostile in state.hostiles.iter() {
                if hostile.entity.visible {
                    sprites.push(SpriteView {
                        kind: SpriteKind::Hostile(hostile.kind),
                        pos: hostile.entity.pos,
                        frame: hostile.entity.frame(),
                    });
                }
            }
            for shot in state.projectiles.iter() {
                if shot.entity.visible {
                    sprites.push(SpriteView {
                        kind: SpriteKind::Projectile(shot.kind),
                        pos: shot.entity.pos,
                        frame: shot.entity.frame(),
                    });
                }
            }
            if let Some(pickup) = &state.powerup {
                if pickup.entity.visible {
                    sprites.push(SpriteView {
                        kind: SpriteKind::PowerUp(pickup.kind),
                        pos: pickup.entity.pos,
                        frame: pickup.entity.frame(),
                    });
                }
            }
            if state.avatar.entity.visible {
                sprites.push(SpriteView {
                    kind: SpriteKind::Avatar,
                    pos: state.avatar.entity.pos,
                    frame: state.avatar.entity.frame(),
                });
            }
        }
        Self {
            tick: state.tick,
            phase: state.phase,
            prompt: state.prompt,
            score: state.score,
            bombs: state.avatar.bombs(),
            sprites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Playfield;

    #[test]
    fn test_menu_phase_shows_no_sprites() {
        let state = GameState::new(Playfield::new(480, 800), 1).unwrap();
        let snap = FrameSnapshot::capture(&state);
        assert_eq!(snap.phase, Phase::Idle);
        assert!(snap.sprites.is_empty());
    }

    #[test]
    fn test_capture_lists_only_visible_sprites() {
        let mut state = GameState::new(Playfield::new(480, 800), 1).unwrap();
        state.apply(crate::sim::Command::Press(crate::sim::Button::Start));
        state.hostiles.spawn(HostileKind::Light, 8, 10);
        state.hostiles.spawn(HostileKind::Heavy, 4, 100);
        if let Some(h) = state.hostiles.iter_mut().next() {
            h.entity.visible = false;
        }
        let snap = FrameSnapshot::capture(&state);
        let hostiles: Vec<_> = snap
            .sprites
            .iter()
            .filter(|s| matches!(s.kind, SpriteKind::Hostile(_)))
            .collect();
        assert_eq!(hostiles.len(), 1);
        // Avatar drawn last, on top of everything
        assert_eq!(snap.sprites.last().unwrap().kind, SpriteKind::Avatar);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(Playfield::new(480, 800), 1).unwrap();
        state.apply(crate::sim::Command::Press(crate::sim::Button::Start));
        let snap = FrameSnapshot::capture(&state);
        let line = serde_json::to_string(&snap).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&line).unwrap();
        assert_eq!(back, snap);
    }
}
