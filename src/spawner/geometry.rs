// src/spawner/geometry.rs
//! Raw candidate positions for each placement mode. No surface validation
//! happens here; callers snap the result to the walkable surface afterwards.

use bevy::prelude::*;
use rand::Rng;

/// Effective ring radius never collapses below this, so a zero-radius rule
/// still scatters instead of stacking actors on the center.
pub const MIN_RING_RADIUS: f32 = 0.1;

/// Random point on the perimeter of the circle around `center`, in the XZ
/// plane. The radius gets a symmetric jitter of up to `radius_jitter`.
pub fn ring_position(center: Vec3, radius: f32, radius_jitter: f32, rng: &mut impl Rng) -> Vec3 {
    let wobble = if radius_jitter > 0.0 {
        rng.random_range(-radius_jitter..=radius_jitter)
    } else {
        0.0
    };
    let r = (radius + wobble).max(MIN_RING_RADIUS);
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    center + Vec3::new(angle.cos(), 0.0, angle.sin()) * r
}

/// Uniform pick over a fixed point set. `None` for an empty set.
pub fn pick_point(points: &[Entity], rng: &mut impl Rng) -> Option<Entity> {
    if points.is_empty() {
        return None;
    }
    Some(points[rng.random_range(0..points.len())])
}
