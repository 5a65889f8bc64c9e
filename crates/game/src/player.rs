use bevy::prelude::*;

/// The shooter. Input mapping and movement live outside this crate; the
/// gameplay systems only care about where the player is and where they aim.
#[derive(Component, Clone, Copy, Default)]
pub struct Player;

/// Normalized aim direction, kept current by whatever drives the player.
#[derive(Component, Clone, Copy, Debug)]
pub struct AimDirection(pub Vec2);

impl Default for AimDirection {
    fn default() -> Self {
        Self(Vec2::X)
    }
}
