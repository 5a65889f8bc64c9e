use bevy::prelude::*;
use serde::Deserialize;
use utils::math::{calculate_spread_angle, rotate_vec2};
use utils::rng::GameRng;

use crate::collider::{is_colliding, Collider, ColliderShape};
use crate::player::AimDirection;
use crate::target::{Death, Health, Target};

const BULLET_SIZE: Vec2 = Vec2::new(10.0, 10.0);
const BULLET_RADIUS: f32 = 5.0;

/// Ranges the weapon rerolls its stats from after every shot, loaded from RON.
///
/// The arcade gimmick of the original game: the gun you fire next is never
/// the gun you fired last.
#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct WeaponRollConfig {
    pub fire_rate_seconds: (f32, f32),
    pub projectiles_per_shot: (u32, u32),
    /// Full spread cone, radians.
    pub spread: (f32, f32),
    pub projectile_speed: (f32, f32),
    pub damage: (f32, f32),
    pub lifetime_seconds: (f32, f32),
    /// Used only when the gravity coin flip lands on "on".
    pub gravity: (f32, f32),
}

impl Default for WeaponRollConfig {
    fn default() -> Self {
        Self {
            fire_rate_seconds: (0.0, 3.0),
            projectiles_per_shot: (1, 10),
            spread: (0.0, 0.175),
            projectile_speed: (100.0, 1000.0),
            damage: (1.0, 50.0),
            lifetime_seconds: (0.5, 25.0),
            gravity: (0.0, 500.0),
        }
    }
}

/// One rolled set of weapon stats.
#[derive(Debug, Clone)]
pub struct WeaponStats {
    pub fire_rate_seconds: f32,
    pub projectiles_per_shot: u32,
    pub spread: f32,
    pub projectile_speed: f32,
    pub damage: f32,
    pub lifetime_seconds: f32,
    pub gravity: f32,
}

impl WeaponStats {
    pub fn roll(config: &WeaponRollConfig, rng: &mut GameRng) -> Self {
        let gravity_enabled = rng.next_bool();
        Self {
            fire_rate_seconds: rng.next_range(config.fire_rate_seconds.0, config.fire_rate_seconds.1),
            projectiles_per_shot: rng
                .next_range_u32(config.projectiles_per_shot.0, config.projectiles_per_shot.1),
            spread: rng.next_range(config.spread.0, config.spread.1),
            projectile_speed: rng.next_range(config.projectile_speed.0, config.projectile_speed.1),
            damage: rng.next_range(config.damage.0, config.damage.1),
            lifetime_seconds: rng.next_range(config.lifetime_seconds.0, config.lifetime_seconds.1),
            gravity: if gravity_enabled {
                rng.next_range(config.gravity.0, config.gravity.1)
            } else {
                0.0
            },
        }
    }
}

/// Component for the player's weapon. Firing is gated by a countdown timer;
/// stats reroll after every shot.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub stats: WeaponStats,
    pub fire_timer: f32,
    pub can_shoot: bool,
}

impl Weapon {
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            stats,
            fire_timer: 0.0,
            can_shoot: true,
        }
    }
}

/// Component for bullets.
#[derive(Component, Clone, Debug)]
pub struct Bullet {
    pub velocity: Vec2,
    pub damage: f32,
    pub lifetime: f32,
    pub gravity: f32,
}

/// Request to fire the weapon carried by `shooter`.
#[derive(Event, Debug, Clone, Copy)]
pub struct FireWeaponEvent {
    pub shooter: Entity,
}

/// Counts the fire timer down and re-arms the weapon, mirroring the
/// spawn-group pacing style: state mutation only, firing happens on demand.
pub fn weapon_tick_system(time: Res<Time>, mut weapons: Query<&mut Weapon>) {
    let dt = time.delta_secs();
    for mut weapon in weapons.iter_mut() {
        weapon.fire_timer -= dt;
        if !weapon.can_shoot && weapon.fire_timer < 0.0 {
            weapon.can_shoot = true;
        }
    }
}

/// Consumes fire requests: spawns one volley of bullets with per-bullet
/// spread, then rerolls the weapon stats for the next shot.
pub fn weapon_fire_system(
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    rolls: Option<Res<Assets<WeaponRollConfig>>>,
    global_assets: Option<Res<crate::global_asset::GlobalAsset>>,
    mut fire_events: EventReader<FireWeaponEvent>,
    mut shooters: Query<(&mut Weapon, &Transform, &AimDirection)>,
) {
    for event in fire_events.read() {
        let Ok((mut weapon, transform, aim)) = shooters.get_mut(event.shooter) else {
            continue;
        };
        if !weapon.can_shoot {
            continue;
        }

        let aim_dir = if aim.0.length_squared() > 0.0 {
            aim.0.normalize()
        } else {
            Vec2::X
        };

        for _ in 0..weapon.stats.projectiles_per_shot {
            let angle = calculate_spread_angle(rng.as_mut(), weapon.stats.spread);
            let direction = rotate_vec2(aim_dir, angle);
            spawn_bullet(&mut commands, transform.translation, direction, &weapon.stats);
        }

        weapon.can_shoot = false;
        weapon.fire_timer = weapon.stats.fire_rate_seconds;

        // Reroll for the next shot when the roll table is available;
        // otherwise keep shooting with the current stats.
        if let (Some(rolls), Some(handles)) = (&rolls, &global_assets) {
            if let Some(config) = rolls.get(&handles.weapon_rolls) {
                weapon.stats = WeaponStats::roll(config, rng.as_mut());
            }
        }
    }
}

fn spawn_bullet(commands: &mut Commands, origin: Vec3, direction: Vec2, stats: &WeaponStats) {
    commands.spawn((
        Bullet {
            velocity: direction * stats.projectile_speed,
            damage: stats.damage,
            lifetime: stats.lifetime_seconds,
            gravity: stats.gravity,
        },
        Sprite::from_color(Color::BLACK, BULLET_SIZE),
        Transform::from_translation(origin),
    ));
}

/// Moves bullets by velocity (plus optional gravity) and expires them.
pub fn bullet_move_system(
    time: Res<Time>,
    mut commands: Commands,
    mut bullets: Query<(Entity, &mut Transform, &mut Bullet)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut bullet) in bullets.iter_mut() {
        let fall = bullet.gravity * dt;
        bullet.velocity.y -= fall;
        transform.translation.x += bullet.velocity.x * dt;
        transform.translation.y += bullet.velocity.y * dt;

        bullet.lifetime -= dt;
        if bullet.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Applies bullet damage to the first live target each bullet touches.
pub fn bullet_collision_system(
    mut commands: Commands,
    bullets: Query<(Entity, &Transform, &Bullet)>,
    mut targets: Query<(&Transform, &Collider, &mut Health), (With<Target>, Without<Death>)>,
) {
    let bullet_collider = Collider {
        shape: ColliderShape::Circle {
            radius: BULLET_RADIUS,
        },
        offset: Vec2::ZERO,
    };

    for (bullet_entity, bullet_transform, bullet) in bullets.iter() {
        for (target_transform, target_collider, mut health) in targets.iter_mut() {
            if !is_colliding(
                bullet_transform.translation.truncate(),
                &bullet_collider,
                target_transform.translation.truncate(),
                target_collider,
            ) {
                continue;
            }

            health.current -= bullet.damage;
            commands.entity(bullet_entity).despawn();
            break;
        }
    }
}
