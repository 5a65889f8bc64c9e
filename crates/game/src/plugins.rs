use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use utils::rng::GameRng;

use crate::global_asset::{add_global_asset, loading_asset_system};
use crate::spawn_group::config::SpawnGroupConfig;
use crate::spawn_group::systems::{
    handle_target_kills, spawn_group_config_update_system, spawn_group_update,
    track_player_presence,
};
use crate::target::{corpse_cleanup, target_death_trigger, TargetConfig, TargetKilled};
use crate::weapons::{
    bullet_collision_system, bullet_move_system, weapon_fire_system, weapon_tick_system,
    FireWeaponEvent, WeaponRollConfig,
};

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Wires the whole gameplay layer: config assets, deterministic RNG,
/// weapon/bullet systems, target lifecycle and spawn-group direction.
pub struct BounceGamePlugin {
    rng_seed: u32,
}

impl BounceGamePlugin {
    pub fn new(rng_seed: u32) -> Self {
        Self { rng_seed }
    }
}

impl Plugin for BounceGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RonAssetPlugin::<SpawnGroupConfig>::new(&["ron"]),
            RonAssetPlugin::<WeaponRollConfig>::new(&["ron"]),
            RonAssetPlugin::<TargetConfig>::new(&["ron"]),
        ));

        app.init_state::<AppState>();
        app.insert_resource(GameRng::new(self.rng_seed));

        app.add_event::<TargetKilled>();
        app.add_event::<FireWeaponEvent>();

        app.add_systems(Startup, add_global_asset);
        app.add_systems(
            Update,
            loading_asset_system.run_if(in_state(AppState::Loading)),
        );

        app.add_systems(
            Update,
            (
                // SPAWN DIRECTION
                track_player_presence,
                spawn_group_update.after(track_player_presence),
                // WEAPON
                weapon_tick_system,
                weapon_fire_system.after(weapon_tick_system),
                bullet_move_system.after(weapon_fire_system),
                bullet_collision_system.after(bullet_move_system),
                // TARGET LIFECYCLE
                target_death_trigger.after(bullet_collision_system),
                handle_target_kills.after(target_death_trigger),
                corpse_cleanup.after(handle_target_kills),
                // CONFIG HOT RELOAD
                spawn_group_config_update_system,
            )
                .run_if(in_state(AppState::InGame)),
        );
    }
}
