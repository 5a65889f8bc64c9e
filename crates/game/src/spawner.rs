use bevy::prelude::*;

use crate::collider::{Collider, ColliderShape};
use crate::target::{Health, OwnedBySpawner, Target, TargetConfig};

const TARGET_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const TARGET_COLOR: Color = Color::srgb(0.9, 0.25, 0.25);

/// One fixed spawn point. Owns the targets it has placed so a group reset
/// can clear them all synchronously.
#[derive(Component, Debug, Clone)]
pub struct TargetSpawner {
    template: TargetConfig,
    live: Vec<Entity>,
}

impl TargetSpawner {
    pub fn new(template: TargetConfig) -> Self {
        Self {
            template,
            live: Vec::new(),
        }
    }

    /// Places one target at this spawner's position and takes ownership of it.
    pub fn spawn_target(
        &mut self,
        commands: &mut Commands,
        self_entity: Entity,
        transform: &Transform,
    ) -> Entity {
        let target = commands
            .spawn((
                Target {
                    score: self.template.score,
                    corpse_seconds: self.template.corpse_seconds,
                },
                Health::new(self.template.max_health),
                OwnedBySpawner(self_entity),
                Collider {
                    shape: ColliderShape::Rectangle {
                        width: TARGET_SIZE.x,
                        height: TARGET_SIZE.y,
                    },
                    offset: Vec2::ZERO,
                },
                Sprite::from_color(TARGET_COLOR, TARGET_SIZE),
                Transform::from_translation(transform.translation),
            ))
            .id();

        self.live.push(target);
        target
    }

    /// Despawns every target this spawner still owns.
    pub fn clear_targets(&mut self, commands: &mut Commands) {
        for entity in self.live.drain(..) {
            if let Some(entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn_recursive();
            }
        }
    }

    /// Drops a despawned target from the ownership list.
    pub fn forget(&mut self, target: Entity) {
        self.live.retain(|&e| e != target);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn template(&self) -> &TargetConfig {
        &self.template
    }
}
