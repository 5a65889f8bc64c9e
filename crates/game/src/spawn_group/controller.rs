use bevy::log::{info, warn};
use utils::rng::GameRng;

use super::config::SpawnGroupConfig;

/// Collaborator contract between a spawn group and its spawner pool.
///
/// The controller only ever asks a spawner to place one target or to forget
/// everything it owns; placement mechanics live behind this trait. Calls are
/// fire-and-forget and must not block.
pub trait SpawnerPool {
    /// Number of spawners available to this group.
    fn spawner_count(&self) -> usize;

    /// Asks the spawner at `index` to place one target.
    ///
    /// Returns `false` when the spawner could not place it (blocked spawn
    /// point, despawned spawner entity). The controller does not retry
    /// explicitly; the next pacing interval tries again.
    fn request_spawn(&mut self, index: usize) -> bool;

    /// Tells every spawner to despawn the targets it owns.
    fn clear_all(&mut self);
}

/// Single authority over wave pacing, population cap and session reset for
/// one spawn group.
///
/// Plain state, no engine types: the ECS systems own one of these per group
/// entity and drive it with `update` plus the area/kill callbacks. Keeping
/// it engine-free is what makes the state machine unit-testable with fake
/// pools and a seeded RNG.
#[derive(Debug, Clone)]
pub struct SpawnGroupController {
    config: SpawnGroupConfig,
    player_in_area: bool,
    current_targets: u32,
    killed_targets: u32,
    spawn_timer: f32,
    reset_timer: f32,
    reset_timer_active: bool,
}

impl SpawnGroupController {
    /// Builds an idle controller. `config` is expected to be sanitized
    /// already; see [`SpawnGroupConfig::sanitized`].
    pub fn new(config: SpawnGroupConfig) -> Self {
        Self {
            player_in_area: false,
            current_targets: 0,
            killed_targets: 0,
            spawn_timer: config.initial_spawn_delay,
            reset_timer: config.reset_delay,
            reset_timer_active: false,
            config,
        }
    }

    /// Player entered the detection volume. Disarms the inactivity watchdog;
    /// spawning itself stays timer-driven.
    pub fn on_area_enter(&mut self) {
        self.player_in_area = true;
        self.reset_timer_active = false;
    }

    /// Player left the detection volume. Arms the inactivity watchdog.
    pub fn on_area_exit(&mut self) {
        self.player_in_area = false;
        self.reset_timer_active = true;
        self.reset_timer = self.config.reset_delay;
    }

    /// One simulation step. Watchdog first, then pacing, so an expiring
    /// watchdog cannot be outrun by a same-tick spawn.
    pub fn update(&mut self, delta_seconds: f32, pool: &mut dyn SpawnerPool, rng: &mut GameRng) {
        if self.reset_timer_active {
            self.reset_timer -= delta_seconds;
            if self.reset_timer <= 0.0 {
                info!(
                    "spawn group idle for {:.0}s, resetting",
                    self.config.reset_delay
                );
                self.reset(pool);
            }
        }

        if self.player_in_area {
            self.spawn_timer -= delta_seconds;
            if self.spawn_timer <= 0.0 {
                self.attempt_spawn(pool, rng);
                self.spawn_timer = self.config.spawn_rate;
            }
        }
    }

    /// One spawn attempt: no-op at the population cap, uniform random
    /// spawner choice otherwise. An empty pool is a configuration error,
    /// reported and skipped rather than fatal.
    pub fn attempt_spawn(&mut self, pool: &mut dyn SpawnerPool, rng: &mut GameRng) {
        if self.current_targets >= self.config.max_targets {
            return;
        }

        let count = pool.spawner_count();
        if count == 0 {
            warn!("spawn group has no spawners, skipping spawn attempt");
            return;
        }

        let index = rng.next_index(count);
        if pool.request_spawn(index) {
            self.current_targets += 1;
        }
    }

    /// A target owned by this group died. At the kill threshold the whole
    /// group resets immediately, independent of the watchdog.
    pub fn on_target_killed(&mut self, pool: &mut dyn SpawnerPool) {
        self.current_targets = self.current_targets.saturating_sub(1);
        self.killed_targets += 1;

        if self.killed_targets >= self.config.stop_kill_count {
            info!(
                "spawn group hit {} kills, resetting",
                self.config.stop_kill_count
            );
            self.reset(pool);
        }
    }

    /// Full reset: zeroed counters, disarmed watchdog, fresh pacing timer,
    /// and every spawner told to clear its live targets. Idempotent.
    pub fn reset(&mut self, pool: &mut dyn SpawnerPool) {
        self.current_targets = 0;
        self.killed_targets = 0;
        self.reset_timer = self.config.reset_delay;
        self.reset_timer_active = false;
        self.spawn_timer = self.config.spawn_rate;
        pool.clear_all();
    }

    /// Replaces the pacing parameters without touching live counters.
    /// Used by config hot-reload.
    pub fn apply_config(&mut self, config: SpawnGroupConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SpawnGroupConfig {
        &self.config
    }

    pub fn player_in_area(&self) -> bool {
        self.player_in_area
    }

    pub fn current_targets(&self) -> u32 {
        self.current_targets
    }

    pub fn killed_targets(&self) -> u32 {
        self.killed_targets
    }

    pub fn reset_timer_active(&self) -> bool {
        self.reset_timer_active
    }
}
