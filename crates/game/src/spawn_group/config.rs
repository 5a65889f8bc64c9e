use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Floor applied to `spawn_rate` at validation time. A zero or negative
/// rate would make the pacing timer fire on every tick.
pub const MIN_SPAWN_RATE: f32 = 0.05;

/// Pacing and population parameters for one spawn group.
///
/// Set once before the group starts running; hot-reloading the RON asset
/// replaces the parameters without touching the group's live counters.
#[derive(Asset, TypePath, Deserialize, Debug, Clone, PartialEq)]
pub struct SpawnGroupConfig {
    /// Maximum simultaneous live targets attributable to this group.
    pub max_targets: u32,
    /// Cumulative kill count that forces a full reset.
    pub stop_kill_count: u32,
    /// First value of the spawn timer, before the steady `spawn_rate` cadence.
    pub initial_spawn_delay: f32,
    /// Seconds between spawn attempts while the player is in the area.
    pub spawn_rate: f32,
    /// Seconds of player absence before the inactivity watchdog resets the group.
    pub reset_delay: f32,
}

impl Default for SpawnGroupConfig {
    fn default() -> Self {
        Self {
            max_targets: 15,
            stop_kill_count: 20,
            initial_spawn_delay: 1.0,
            spawn_rate: 1.0,
            reset_delay: 180.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnGroupConfigError {
    #[error("spawn_rate {0} is below the minimum, clamped to {MIN_SPAWN_RATE}")]
    NonPositiveSpawnRate(f32),
    #[error("{field} {value} is negative, clamped to 0")]
    NegativeDelay { field: &'static str, value: f32 },
}

impl SpawnGroupConfig {
    /// Returns a copy safe to run with, plus everything that had to be fixed.
    ///
    /// Configuration problems are never fatal: a bad field degrades to the
    /// nearest safe value and the caller is expected to log the errors.
    pub fn sanitized(&self) -> (Self, Vec<SpawnGroupConfigError>) {
        let mut fixed = self.clone();
        let mut errors = Vec::new();

        if fixed.spawn_rate < MIN_SPAWN_RATE {
            errors.push(SpawnGroupConfigError::NonPositiveSpawnRate(fixed.spawn_rate));
            fixed.spawn_rate = MIN_SPAWN_RATE;
        }
        if fixed.initial_spawn_delay < 0.0 {
            errors.push(SpawnGroupConfigError::NegativeDelay {
                field: "initial_spawn_delay",
                value: fixed.initial_spawn_delay,
            });
            fixed.initial_spawn_delay = 0.0;
        }
        if fixed.reset_delay < 0.0 {
            errors.push(SpawnGroupConfigError::NegativeDelay {
                field: "reset_delay",
                value: fixed.reset_delay,
            });
            fixed.reset_delay = 0.0;
        }

        (fixed, errors)
    }
}
