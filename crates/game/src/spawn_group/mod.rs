pub mod config;
pub mod controller;
pub mod systems;

pub use config::{SpawnGroupConfig, SpawnGroupConfigError, MIN_SPAWN_RATE};
pub use controller::{SpawnGroupController, SpawnerPool};
pub use systems::{DetectionVolume, SpawnGroup};
