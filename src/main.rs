use bevy::prelude::*;

use game::global_asset::GlobalAsset;
use game::player::{AimDirection, Player};
use game::plugins::{AppState, BounceGamePlugin};
use game::spawn_group::{DetectionVolume, SpawnGroup, SpawnGroupConfig, SpawnGroupController};
use game::spawner::TargetSpawner;
use game::target::{Death, Target, TargetConfig};
use game::weapons::{FireWeaponEvent, Weapon, WeaponRollConfig, WeaponStats};
use utils::rng::GameRng;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(BounceGamePlugin::new(0x0B0A7CE5))
        .add_systems(OnEnter(AppState::InGame), setup_level)
        .add_systems(
            Update,
            (patrol_player, aim_and_autofire).run_if(in_state(AppState::InGame)),
        )
        .run();
}

const SPAWNER_POSITIONS: [Vec3; 4] = [
    Vec3::new(-240.0, 160.0, 0.0),
    Vec3::new(-80.0, 220.0, 0.0),
    Vec3::new(80.0, 220.0, 0.0),
    Vec3::new(240.0, 160.0, 0.0),
];

/// One shooting range: a player, a row of target spawners and the spawn
/// group directing them.
fn setup_level(
    mut commands: Commands,
    global: Res<GlobalAsset>,
    spawn_configs: Res<Assets<SpawnGroupConfig>>,
    roll_configs: Res<Assets<WeaponRollConfig>>,
    target_configs: Res<Assets<TargetConfig>>,
    mut rng: ResMut<GameRng>,
) {
    commands.spawn(Camera2d);

    let spawn_config = spawn_configs
        .get(&global.spawn_group)
        .cloned()
        .unwrap_or_default();
    let (spawn_config, errors) = spawn_config.sanitized();
    for error in &errors {
        warn!("spawn group config: {}", error);
    }
    let rolls = roll_configs
        .get(&global.weapon_rolls)
        .cloned()
        .unwrap_or_default();
    let target_template = target_configs.get(&global.target).cloned().unwrap_or_default();

    commands.spawn((
        Player,
        AimDirection::default(),
        Weapon::new(WeaponStats::roll(&rolls, rng.as_mut())),
        Sprite::from_color(Color::srgb(0.2, 0.6, 0.9), Vec2::new(24.0, 24.0)),
        Transform::from_xyz(0.0, -220.0, 1.0),
    ));

    let spawners: Vec<Entity> = SPAWNER_POSITIONS
        .iter()
        .map(|position| {
            commands
                .spawn((
                    TargetSpawner::new(target_template.clone()),
                    Sprite::from_color(Color::srgb(0.3, 0.3, 0.35), Vec2::new(12.0, 12.0)),
                    Transform::from_translation(*position),
                ))
                .id()
        })
        .collect();

    commands.spawn((
        SpawnGroup {
            controller: SpawnGroupController::new(spawn_config),
            spawners,
        },
        DetectionVolume {
            half_extents: Vec2::new(400.0, 300.0),
        },
        Transform::default(),
    ));

    info!("shooting range ready");
}

/// Drifts the player in and out of the detection volume so enter/exit and
/// the inactivity watchdog all get exercised without input bindings.
fn patrol_player(time: Res<Time>, mut players: Query<&mut Transform, With<Player>>) {
    let Ok(mut transform) = players.get_single_mut() else {
        return;
    };
    transform.translation.x = (time.elapsed_secs() * 0.25).sin() * 520.0;
}

/// Aims at the nearest live target and keeps the trigger held.
fn aim_and_autofire(
    mut fire: EventWriter<FireWeaponEvent>,
    mut players: Query<(Entity, &Transform, &mut AimDirection), With<Player>>,
    targets: Query<&Transform, (With<Target>, Without<Death>)>,
) {
    let Ok((shooter, transform, mut aim)) = players.get_single_mut() else {
        return;
    };
    let origin = transform.translation.truncate();

    let mut nearest: Option<(f32, Vec2)> = None;
    for target in targets.iter() {
        let offset = target.translation.truncate() - origin;
        let distance = offset.length_squared();
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, offset));
        }
    }

    if let Some((_, offset)) = nearest {
        if offset.length_squared() > 0.0 {
            aim.0 = offset.normalize();
        }
        fire.send(FireWeaponEvent { shooter });
    }
}
