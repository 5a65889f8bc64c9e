use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ColliderShape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

/// Minimal overlap shape for hit tests. Gameplay only needs "did the bullet
/// touch the target"; physical collision resolution stays with the engine.
#[derive(Component, Clone, Debug, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset from the entity transform.
    pub offset: Vec2,
}

pub fn is_colliding(pos_a: Vec2, collider_a: &Collider, pos_b: Vec2, collider_b: &Collider) -> bool {
    let final_pos_a = pos_a + collider_a.offset;
    let final_pos_b = pos_b + collider_b.offset;

    match (&collider_a.shape, &collider_b.shape) {
        (ColliderShape::Circle { radius: radius_a }, ColliderShape::Circle { radius: radius_b }) => {
            let combined = radius_a + radius_b;
            final_pos_a.distance_squared(final_pos_b) < combined * combined
        }

        (
            ColliderShape::Rectangle {
                width: width_a,
                height: height_a,
            },
            ColliderShape::Rectangle {
                width: width_b,
                height: height_b,
            },
        ) => {
            let half_a = Vec2::new(width_a * 0.5, height_a * 0.5);
            let half_b = Vec2::new(width_b * 0.5, height_b * 0.5);
            let delta = final_pos_a - final_pos_b;
            delta.x.abs() <= half_a.x + half_b.x && delta.y.abs() <= half_a.y + half_b.y
        }

        (ColliderShape::Circle { radius }, ColliderShape::Rectangle { width, height }) => {
            circle_rect_collision(final_pos_a, *radius, final_pos_b, *width, *height)
        }

        (ColliderShape::Rectangle { width, height }, ColliderShape::Circle { radius }) => {
            circle_rect_collision(final_pos_b, *radius, final_pos_a, *width, *height)
        }
    }
}

fn circle_rect_collision(
    circle_pos: Vec2,
    circle_radius: f32,
    rect_pos: Vec2,
    rect_width: f32,
    rect_height: f32,
) -> bool {
    let half_width = rect_width * 0.5;
    let half_height = rect_height * 0.5;

    // Closest point on the rectangle to the circle center.
    let closest_x = circle_pos.x.clamp(rect_pos.x - half_width, rect_pos.x + half_width);
    let closest_y = circle_pos.y.clamp(rect_pos.y - half_height, rect_pos.y + half_height);

    let diff = Vec2::new(circle_pos.x - closest_x, circle_pos.y - closest_y);
    diff.length_squared() < circle_radius * circle_radius
}
