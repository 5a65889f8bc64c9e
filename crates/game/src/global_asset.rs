use bevy::prelude::*;

use crate::plugins::AppState;
use crate::spawn_group::SpawnGroupConfig;
use crate::target::TargetConfig;
use crate::weapons::WeaponRollConfig;

const SPAWN_GROUP_CONFIG_PATH: &str = "config/spawn_group.ron";
const WEAPON_ROLLS_CONFIG_PATH: &str = "config/weapon_rolls.ron";
const TARGET_CONFIG_PATH: &str = "config/target.ron";

/// Handles to every RON gameplay config; inserted at startup, gates the
/// transition out of `AppState::Loading`.
#[derive(Resource)]
pub struct GlobalAsset {
    pub spawn_group: Handle<SpawnGroupConfig>,
    pub weapon_rolls: Handle<WeaponRollConfig>,
    pub target: Handle<TargetConfig>,
}

impl GlobalAsset {
    pub fn create(asset_server: &AssetServer) -> Self {
        Self {
            spawn_group: asset_server.load(SPAWN_GROUP_CONFIG_PATH),
            weapon_rolls: asset_server.load(WEAPON_ROLLS_CONFIG_PATH),
            target: asset_server.load(TARGET_CONFIG_PATH),
        }
    }
}

pub fn add_global_asset(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GlobalAsset::create(&asset_server));
}

pub fn loading_asset_system(
    mut app_state: ResMut<NextState<AppState>>,
    global_assets: Res<GlobalAsset>,
    asset_server: Res<AssetServer>,
) {
    if !asset_server.load_state(&global_assets.spawn_group).is_loaded() {
        return;
    }
    if !asset_server.load_state(&global_assets.weapon_rolls).is_loaded() {
        return;
    }
    if !asset_server.load_state(&global_assets.target).is_loaded() {
        return;
    }

    app_state.set(AppState::InGame);
    info!("config assets loaded, entering game");
}
