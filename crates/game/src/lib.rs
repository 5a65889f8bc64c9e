pub mod collider;
pub mod global_asset;
pub mod player;
pub mod plugins;
pub mod spawn_group;
pub mod spawner;
pub mod target;
pub mod weapons;
