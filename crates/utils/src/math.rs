use bevy::math::Vec2;

use crate::rng::GameRng;

/// Axis-aligned rectangle test used by detection volumes.
pub fn rect_contains_point(center: Vec2, half_extents: Vec2, point: Vec2) -> bool {
    let delta = point - center;
    delta.x.abs() <= half_extents.x && delta.y.abs() <= half_extents.y
}

/// Random deviation applied to a shot direction, in radians.
///
/// `spread` is the full cone angle: the result lands in
/// `[-spread / 2, spread / 2)`.
pub fn calculate_spread_angle(rng: &mut GameRng, spread: f32) -> f32 {
    let random_val_neg_0_5_to_0_5 = rng.next_f32() - 0.5;
    random_val_neg_0_5_to_0_5 * spread
}

/// Rotates a direction vector by `angle` radians.
pub fn rotate_vec2(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rect_contains_point() {
        let center = Vec2::new(10.0, -5.0);
        let half = Vec2::new(2.0, 3.0);

        assert!(rect_contains_point(center, half, center), "Center is inside.");
        assert!(
            rect_contains_point(center, half, Vec2::new(12.0, -2.0)),
            "Edges count as inside."
        );
        assert!(
            !rect_contains_point(center, half, Vec2::new(12.1, -5.0)),
            "Just past the x edge is outside."
        );
        assert!(
            !rect_contains_point(center, half, Vec2::new(10.0, -8.5)),
            "Just past the y edge is outside."
        );
    }

    #[test]
    fn test_calculate_spread_angle_range() {
        let mut rng = GameRng::new(88888);
        let max_spread_rad = PI / 4.0;

        for _ in 0..1000 {
            let angle = calculate_spread_angle(&mut rng, max_spread_rad);
            let half_max_spread = max_spread_rad * 0.5;
            assert!(
                angle >= -half_max_spread && angle < half_max_spread,
                "Calculated spread angle {} was not in range [{}, {}) for max_spread_rad {}",
                angle,
                -half_max_spread,
                half_max_spread,
                max_spread_rad
            );
        }

        let angle_zero_spread = calculate_spread_angle(&mut rng, 0.0);
        assert_eq!(angle_zero_spread, 0.0, "Angle with zero spread should be zero.");
    }

    #[test]
    fn test_rotate_vec2_quarter_turn() {
        let rotated = rotate_vec2(Vec2::X, FRAC_PI_2);
        assert!(
            (rotated - Vec2::Y).length() < 1e-6,
            "Rotating +X by a quarter turn should give +Y, got {:?}",
            rotated
        );
    }
}
