//! Pairwise collision passes, in a fixed order per tick
//!
//! The tricky part is projectile speed: a shot crosses many times its own
//! height per tick, so contact is tested in seven micro-steps of one
//! shot-height each. Within a step the first overlapping hostile in spawn
//! order takes the hit and the shot burns out.
//!
//! Pass order each tick: shots vs hostiles, then avatar vs hostiles, then
//! avatar vs pickup.

use super::avatar::Avatar;
use super::events::GameEvent;
use super::hostile::HostileSet;
use super::powerup::PowerUp;
use super::projectile::ProjectileSet;
use crate::consts::COLLISION_STEPS;

/// Micro-stepped shot pass. Returns the points scored by kills.
pub fn projectile_pass(
    shots: &mut ProjectileSet,
    hostiles: &mut HostileSet,
    events: &mut Vec<GameEvent>,
) -> u64 {
    let mut points = 0u64;
    for _ in 0..COLLISION_STEPS {
        for shot in shots.iter_mut() {
            shot.step();
            if !shot.entity.visible {
                continue;
            }
            for hostile in hostiles.iter_mut() {
                if !hostile.alive() || !hostile.entity.collides_with(&shot.entity) {
                    continue;
                }
                shot.entity.visible = false;
                if hostile.hit() {
                    points += u64::from(hostile.kind.score());
                    events.push(GameEvent::HostileDestroyed { kind: hostile.kind });
                }
                break; // one shot, one hit
            }
        }
    }
    points
}

/// Contact pass. Every overlapping hostile takes a flash hit, but the first
/// contact downs the avatar, so later hostiles in the same pass are spared.
/// Returns the points scored by ram kills.
pub fn avatar_pass(
    avatar: &mut Avatar,
    hostiles: &mut HostileSet,
    events: &mut Vec<GameEvent>,
) -> u64 {
    let mut points = 0u64;
    for hostile in hostiles.iter_mut() {
        if !avatar.alive() || !hostile.alive() || !hostile.entity.collides_with(&avatar.entity) {
            continue;
        }
        if hostile.hit() {
            points += u64::from(hostile.kind.score());
            events.push(GameEvent::HostileDestroyed { kind: hostile.kind });
        }
        if avatar.knock() {
            events.push(GameEvent::AvatarKnockedOut);
        }
    }
    points
}

/// Pickup pass: touching the pickup applies its prize and consumes it
pub fn powerup_pass(
    avatar: &mut Avatar,
    powerup: &mut Option<PowerUp>,
    events: &mut Vec<GameEvent>,
) {
    let Some(pickup) = powerup.as_mut() else {
        return;
    };
    if !avatar.alive() || !pickup.entity.collides_with(&avatar.entity) {
        return;
    }
    avatar.collect(pickup.kind);
    pickup.entity.visible = false;
    events.push(GameEvent::PowerUpCollected { kind: pickup.kind });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RAPID_FIRE_VOLLEYS;
    use crate::sim::hostile::HostileKind;
    use crate::sim::powerup::PowerUpKind;
    use crate::sim::projectile::ProjectileKind;
    use glam::IVec2;

    const FIELD: IVec2 = IVec2::new(480, 800);

    fn flying_avatar() -> Avatar {
        let mut avatar = Avatar::new();
        avatar.revive(FIELD);
        avatar
    }

    fn place(set: &mut HostileSet, kind: HostileKind, pos: IVec2) {
        set.spawn(kind, 0, 0);
        // spawn parks the craft above the field; drop it where the test wants it
        let hostile = set.iter_mut().last().unwrap();
        hostile.entity.pos = pos;
    }

    #[test]
    fn test_shot_kills_a_light_mid_sweep() {
        let mut shots = ProjectileSet::new();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        place(&mut hostiles, HostileKind::Light, IVec2::new(100, 100));
        shots.spawn(ProjectileKind::Single, IVec2::new(120, 200));

        let points = projectile_pass(&mut shots, &mut hostiles, &mut events);
        assert_eq!(points, 100);
        assert_eq!(
            events,
            vec![GameEvent::HostileDestroyed {
                kind: HostileKind::Light
            }]
        );
        assert!(!shots.iter().next().unwrap().entity.visible);
        let light = hostiles.iter().next().unwrap();
        assert!(!light.alive());
        assert!(light.entity.visible); // death run still playing
    }

    #[test]
    fn test_sweep_covers_the_whole_tick_distance() {
        let mut shots = ProjectileSet::new();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        place(&mut hostiles, HostileKind::Light, IVec2::new(100, 100));
        // Seven steps of 24 px reach from 290 up past the craft
        shots.spawn(ProjectileKind::Single, IVec2::new(120, 290));

        let points = projectile_pass(&mut shots, &mut hostiles, &mut events);
        assert_eq!(points, 100);
    }

    #[test]
    fn test_tough_craft_soak_hits_without_scoring() {
        let mut shots = ProjectileSet::new();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        place(&mut hostiles, HostileKind::Medium, IVec2::new(100, 100));
        shots.spawn(ProjectileKind::Single, IVec2::new(120, 180));

        let points = projectile_pass(&mut shots, &mut hostiles, &mut events);
        assert_eq!(points, 0);
        assert!(events.is_empty());
        let medium = hostiles.iter().next().unwrap();
        assert!(medium.alive());
        assert_eq!(medium.hp(), 14);
        assert_eq!(medium.entity.cursor(), 1); // flash frame
    }

    #[test]
    fn test_first_overlap_in_spawn_order_wins() {
        let mut shots = ProjectileSet::new();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        place(&mut hostiles, HostileKind::Light, IVec2::new(100, 100));
        place(&mut hostiles, HostileKind::Light, IVec2::new(110, 100));
        shots.spawn(ProjectileKind::Single, IVec2::new(120, 150));

        let points = projectile_pass(&mut shots, &mut hostiles, &mut events);
        assert_eq!(points, 100);
        let states: Vec<bool> = hostiles.iter().map(|h| h.alive()).collect();
        assert_eq!(states, vec![false, true]);
    }

    #[test]
    fn test_contact_downs_the_avatar_once() {
        let mut avatar = flying_avatar();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        // Both overlap the avatar's hit box at (205, 700)
        place(&mut hostiles, HostileKind::Light, IVec2::new(200, 690));
        place(&mut hostiles, HostileKind::Light, IVec2::new(210, 690));

        let points = avatar_pass(&mut avatar, &mut hostiles, &mut events);
        assert!(!avatar.alive());
        // Ram kill credits the light craft, and only the first one
        assert_eq!(points, 100);
        assert_eq!(
            events,
            vec![
                GameEvent::HostileDestroyed {
                    kind: HostileKind::Light
                },
                GameEvent::AvatarKnockedOut,
            ]
        );
        let states: Vec<bool> = hostiles.iter().map(|h| h.alive()).collect();
        assert_eq!(states, vec![false, true]);
    }

    #[test]
    fn test_ramming_a_tough_craft_only_dents_it() {
        let mut avatar = flying_avatar();
        let mut hostiles = HostileSet::new();
        let mut events = Vec::new();
        place(&mut hostiles, HostileKind::Heavy, IVec2::new(150, 550));

        let points = avatar_pass(&mut avatar, &mut hostiles, &mut events);
        assert_eq!(points, 0);
        assert!(!avatar.alive());
        let heavy = hostiles.iter().next().unwrap();
        assert!(heavy.alive());
        assert_eq!(heavy.hp(), 39);
        assert_eq!(events, vec![GameEvent::AvatarKnockedOut]);
    }

    #[test]
    fn test_pickup_applies_its_prize_once() {
        let mut avatar = flying_avatar();
        let mut events = Vec::new();
        let mut pickup = PowerUp::new(PowerUpKind::RapidFire, 210);
        pickup.entity.pos = IVec2::new(210, 660);
        let mut slot = Some(pickup);

        powerup_pass(&mut avatar, &mut slot, &mut events);
        assert_eq!(avatar.rapid_fire(), RAPID_FIRE_VOLLEYS);
        assert!(!slot.as_ref().unwrap().entity.visible);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected {
                kind: PowerUpKind::RapidFire
            }]
        );

        // Consumed pickups cannot be collected again
        powerup_pass(&mut avatar, &mut slot, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_bomb_pickup_adds_a_charge() {
        let mut avatar = flying_avatar();
        let mut events = Vec::new();
        let mut pickup = PowerUp::new(PowerUpKind::Bomb, 210);
        pickup.entity.pos = IVec2::new(210, 660);
        let mut slot = Some(pickup);

        powerup_pass(&mut avatar, &mut slot, &mut events);
        assert_eq!(avatar.bombs(), 1);
    }

    #[test]
    fn test_downed_avatar_collects_nothing() {
        let mut avatar = flying_avatar();
        avatar.knock();
        let mut events = Vec::new();
        let mut pickup = PowerUp::new(PowerUpKind::Bomb, 210);
        pickup.entity.pos = IVec2::new(210, 660);
        let mut slot = Some(pickup);

        powerup_pass(&mut avatar, &mut slot, &mut events);
        assert_eq!(avatar.bombs(), 0);
        assert!(slot.as_ref().unwrap().entity.visible);
        assert!(events.is_empty());
    }
}
