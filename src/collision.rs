//! Rectangle overlap tests shared by the physics step and the win check.

use bevy::math::Rect;
use bevy::prelude::*;

/// Contact tolerance below the actor's feet. An actor hovering less than this above a surface,
/// and not moving up, is treated as touching it.
pub const SKIN: f32 = 1.0;

/// Strict overlap: rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// The actor's box stretched down by [`SKIN`], used only for ground contact.
pub fn foot_sensor(bounds: Rect) -> Rect {
    Rect::from_corners(bounds.min, bounds.max + Vec2::new(0.0, SKIN))
}
