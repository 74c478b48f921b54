// src/spawner/resolve.rs
//! Snap a raw candidate position onto the walkable surface.

use bevy::prelude::*;

use crate::spawner::core::SurfaceSampler;

/// Search tolerance never drops below this, so an authored 0 still has a
/// chance of landing on the surface.
pub const MIN_SURFACE_SEARCH: f32 = 0.1;

/// Validate `raw` against the walkable surface. On success the snapped
/// position is paired with the caller's `facing` unchanged. `None` means
/// no walkable point within tolerance; callers skip the spawn for this tick.
pub fn snap_to_surface(
    raw: Vec3,
    facing: Quat,
    search_radius: f32,
    surface: &dyn SurfaceSampler,
) -> Option<(Vec3, Quat)> {
    let tolerance = search_radius.max(MIN_SURFACE_SEARCH);
    surface.sample(raw, tolerance).map(|snapped| (snapped, facing))
}
