use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spawner::TargetSpawner;

/// Stats stamped onto every spawned target, loaded from RON.
#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct TargetConfig {
    pub max_health: f32,
    pub score: u32,
    /// Seconds the body lingers before it despawns.
    pub corpse_seconds: f32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            max_health: 3.0,
            score: 1,
            corpse_seconds: 5.0,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Target {
    pub score: u32,
    pub corpse_seconds: f32,
}

#[derive(Component, Clone, Debug, Serialize, Deserialize, Default)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Back-reference to the spawner that placed this target.
#[derive(Component, Clone, Copy, Debug)]
pub struct OwnedBySpawner(pub Entity);

/// Inserted exactly once when a target runs out of health. Its presence is
/// the at-most-once guard on kill reporting: dead targets drop out of the
/// death-trigger query, so a kill can never be reported twice.
#[derive(Component, Debug)]
pub struct Death {
    pub corpse_timer: f32,
}

/// One kill, reported upward to whichever spawn group owns `spawner`.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetKilled {
    pub target: Entity,
    pub spawner: Entity,
    pub score: u32,
}

const CORPSE_TINT: Color = Color::srgb(0.35, 0.35, 0.35);

/// Transitions targets with depleted health into the dead state and reports
/// the kill. Does not despawn; the corpse lingers for `corpse_seconds`.
pub fn target_death_trigger(
    mut commands: Commands,
    mut kills: EventWriter<TargetKilled>,
    mut query: Query<(Entity, &Health, &Target, &OwnedBySpawner, &mut Sprite), Without<Death>>,
) {
    for (entity, health, target, owned, mut sprite) in query.iter_mut() {
        if health.current > 0.0 {
            continue;
        }

        commands.entity(entity).insert(Death {
            corpse_timer: target.corpse_seconds,
        });
        sprite.color = CORPSE_TINT;
        kills.send(TargetKilled {
            target: entity,
            spawner: owned.0,
            score: target.score,
        });
        info!("target {} destroyed", entity);
    }
}

/// Despawns bodies once their corpse timer runs out and lets the owning
/// spawner forget them.
pub fn corpse_cleanup(
    time: Res<Time>,
    mut commands: Commands,
    mut spawners: Query<&mut TargetSpawner>,
    mut corpses: Query<(Entity, &mut Death, &OwnedBySpawner)>,
) {
    let dt = time.delta_secs();
    for (entity, mut death, owned) in corpses.iter_mut() {
        death.corpse_timer -= dt;
        if death.corpse_timer > 0.0 {
            continue;
        }

        if let Ok(mut spawner) = spawners.get_mut(owned.0) {
            spawner.forget(entity);
        }
        commands.entity(entity).despawn_recursive();
    }
}
