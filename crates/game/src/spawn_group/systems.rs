use bevy::prelude::*;
use utils::math::rect_contains_point;
use utils::rng::GameRng;

use crate::player::Player;
use crate::spawner::TargetSpawner;
use crate::target::TargetKilled;

use super::config::SpawnGroupConfig;
use super::controller::{SpawnGroupController, SpawnerPool};

/// One spawn group in the world: the controller plus the spawner entities
/// it directs. The spawner list is configuration, fixed at setup.
#[derive(Component)]
pub struct SpawnGroup {
    pub controller: SpawnGroupController,
    pub spawners: Vec<Entity>,
}

/// Trigger region gating this group's spawning, centered on the group entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct DetectionVolume {
    pub half_extents: Vec2,
}

/// `SpawnerPool` adapter for the ECS side. The controller runs against this
/// buffer, then the owning system applies the recorded decisions with full
/// world access. Keeps the controller free of engine borrows.
#[derive(Default)]
struct BufferedPool {
    spawner_count: usize,
    spawn_requests: Vec<usize>,
    clear_requested: bool,
}

impl BufferedPool {
    fn for_group(group: &SpawnGroup) -> Self {
        Self {
            spawner_count: group.spawners.len(),
            ..Default::default()
        }
    }
}

impl SpawnerPool for BufferedPool {
    fn spawner_count(&self) -> usize {
        self.spawner_count
    }

    fn request_spawn(&mut self, index: usize) -> bool {
        self.spawn_requests.push(index);
        true
    }

    fn clear_all(&mut self) {
        self.clear_requested = true;
    }
}

fn apply_pool(
    pool: BufferedPool,
    spawner_entities: &[Entity],
    commands: &mut Commands,
    spawners: &mut Query<(&mut TargetSpawner, &Transform)>,
) {
    if pool.clear_requested {
        for &entity in spawner_entities {
            if let Ok((mut spawner, _)) = spawners.get_mut(entity) {
                spawner.clear_targets(commands);
            }
        }
    }

    for index in pool.spawn_requests {
        let Some(&entity) = spawner_entities.get(index) else {
            continue;
        };
        if let Ok((mut spawner, transform)) = spawners.get_mut(entity) {
            let _ = spawner.spawn_target(commands, entity, transform);
        }
    }
}

/// Tracks the player against each group's detection volume and feeds the
/// enter/exit edges to the controller.
pub fn track_player_presence(
    players: Query<&Transform, With<Player>>,
    mut groups: Query<(&Transform, &DetectionVolume, &mut SpawnGroup)>,
) {
    let Ok(player_transform) = players.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (transform, volume, mut group) in groups.iter_mut() {
        let inside = rect_contains_point(
            transform.translation.truncate(),
            volume.half_extents,
            player_pos,
        );
        if inside == group.controller.player_in_area() {
            continue;
        }

        if inside {
            info!("player entered spawn area");
            group.controller.on_area_enter();
        } else {
            info!("player left spawn area, watchdog armed");
            group.controller.on_area_exit();
        }
    }
}

/// Per-tick drive of every spawn group controller.
pub fn spawn_group_update(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut groups: Query<&mut SpawnGroup>,
    mut spawners: Query<(&mut TargetSpawner, &Transform)>,
) {
    let dt = time.delta_secs();
    for mut group in groups.iter_mut() {
        let group = group.as_mut();
        let mut pool = BufferedPool::for_group(group);
        group.controller.update(dt, &mut pool, rng.as_mut());
        apply_pool(pool, &group.spawners, &mut commands, &mut spawners);
    }
}

/// Routes target kill reports to the group that owns the reporting spawner.
pub fn handle_target_kills(
    mut kills: EventReader<TargetKilled>,
    mut commands: Commands,
    mut groups: Query<&mut SpawnGroup>,
    mut spawners: Query<(&mut TargetSpawner, &Transform)>,
) {
    for kill in kills.read() {
        for mut group in groups.iter_mut() {
            if !group.spawners.contains(&kill.spawner) {
                continue;
            }

            let group = group.as_mut();
            let mut pool = BufferedPool::for_group(group);
            group.controller.on_target_killed(&mut pool);
            apply_pool(pool, &group.spawners, &mut commands, &mut spawners);
            break;
        }
    }
}

/// Hot-reload: pushes edited RON parameters into running controllers
/// without disturbing their live counters.
pub fn spawn_group_config_update_system(
    configs: Res<Assets<SpawnGroupConfig>>,
    mut asset_events: EventReader<AssetEvent<SpawnGroupConfig>>,
    mut groups: Query<&mut SpawnGroup>,
) {
    for event in asset_events.read() {
        let AssetEvent::Modified { id } = event else {
            continue;
        };
        let Some(config) = configs.get(*id) else {
            continue;
        };

        let (config, errors) = config.sanitized();
        for error in &errors {
            warn!("spawn group config reload: {}", error);
        }
        for mut group in groups.iter_mut() {
            group.controller.apply_config(config.clone());
        }
        info!("spawn group config reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{Target, TargetConfig};
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn test_config() -> SpawnGroupConfig {
        SpawnGroupConfig {
            max_targets: 5,
            stop_kill_count: 3,
            initial_spawn_delay: 1.0,
            spawn_rate: 1.0,
            reset_delay: 30.0,
        }
    }

    fn setup_world() -> (World, Entity, Entity) {
        let mut world = World::new();
        world.insert_resource(GameRng::new(1234));
        world.insert_resource(Events::<TargetKilled>::default());

        let spawner = world
            .spawn((
                TargetSpawner::new(TargetConfig::default()),
                Transform::from_xyz(50.0, 0.0, 0.0),
            ))
            .id();
        let group = world
            .spawn((
                SpawnGroup {
                    controller: SpawnGroupController::new(test_config()),
                    spawners: vec![spawner],
                },
                DetectionVolume {
                    half_extents: Vec2::new(100.0, 100.0),
                },
                Transform::default(),
            ))
            .id();
        (world, group, spawner)
    }

    fn set_time_delta(world: &mut World, dt: f32) {
        let mut time: Time = Time::default();
        time.advance_by(Duration::from_secs_f32(dt));
        world.insert_resource(time);
    }

    fn controller_of(world: &mut World, group: Entity) -> SpawnGroupController {
        world
            .entity(group)
            .get::<SpawnGroup>()
            .unwrap()
            .controller
            .clone()
    }

    #[test]
    fn test_presence_edges_drive_controller() {
        let (mut world, group, _) = setup_world();
        let player = world
            .spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)))
            .id();

        world.run_system_once(track_player_presence).unwrap();
        assert!(
            controller_of(&mut world, group).player_in_area(),
            "Player inside the volume flips the flag."
        );

        world.entity_mut(player).insert(Transform::from_xyz(500.0, 0.0, 0.0));
        world.run_system_once(track_player_presence).unwrap();
        let controller = controller_of(&mut world, group);
        assert!(!controller.player_in_area());
        assert!(controller.reset_timer_active(), "Leaving arms the watchdog.");
    }

    #[test]
    fn test_update_spawns_real_targets() {
        let (mut world, group, spawner) = setup_world();
        world
            .entity_mut(group)
            .get_mut::<SpawnGroup>()
            .unwrap()
            .controller
            .on_area_enter();

        set_time_delta(&mut world, 1.5);
        world.run_system_once(spawn_group_update).unwrap();

        assert_eq!(controller_of(&mut world, group).current_targets(), 1);
        let mut targets = world.query::<&Target>();
        assert_eq!(targets.iter(&world).count(), 1, "A target entity was placed.");
        assert_eq!(
            world
                .entity(spawner)
                .get::<TargetSpawner>()
                .unwrap()
                .live_count(),
            1,
            "The spawner owns what it placed."
        );
    }

    #[test]
    fn test_kill_routing_and_threshold_reset_clears_targets() {
        let (mut world, group, spawner) = setup_world();
        world
            .entity_mut(group)
            .get_mut::<SpawnGroup>()
            .unwrap()
            .controller
            .on_area_enter();

        // Place two targets through the normal path.
        set_time_delta(&mut world, 1.5);
        world.run_system_once(spawn_group_update).unwrap();
        world.run_system_once(spawn_group_update).unwrap();
        assert_eq!(controller_of(&mut world, group).current_targets(), 2);

        // Two kills: counted, no reset yet (threshold is 3).
        for _ in 0..2 {
            world.send_event(TargetKilled {
                target: Entity::PLACEHOLDER,
                spawner,
                score: 1,
            });
        }
        world.run_system_once(handle_target_kills).unwrap();
        let controller = controller_of(&mut world, group);
        assert_eq!(controller.killed_targets(), 2);
        assert_eq!(controller.current_targets(), 0);

        // Drain the consumed events; run_system_once readers start fresh.
        world.resource_mut::<Events<TargetKilled>>().clear();

        // Third kill crosses the threshold: full reset, spawners cleared.
        world.send_event(TargetKilled {
            target: Entity::PLACEHOLDER,
            spawner,
            score: 1,
        });
        world.run_system_once(handle_target_kills).unwrap();
        let controller = controller_of(&mut world, group);
        assert_eq!(controller.killed_targets(), 0, "Threshold reset zeroes kills.");
        let mut targets = world.query::<&Target>();
        assert_eq!(
            targets.iter(&world).count(),
            0,
            "Reset despawns every live target."
        );
        assert_eq!(
            world
                .entity(spawner)
                .get::<TargetSpawner>()
                .unwrap()
                .live_count(),
            0
        );
    }

    #[test]
    fn test_kill_for_foreign_spawner_is_ignored() {
        let (mut world, group, _) = setup_world();
        let foreign = world.spawn_empty().id();

        world.send_event(TargetKilled {
            target: Entity::PLACEHOLDER,
            spawner: foreign,
            score: 1,
        });
        world.run_system_once(handle_target_kills).unwrap();

        assert_eq!(
            controller_of(&mut world, group).killed_targets(),
            0,
            "Kills from unrelated spawners must not leak into this group."
        );
    }
}
