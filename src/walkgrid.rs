// src/walkgrid.rs
//! Walkable-surface data for the arena: a uniform XZ grid of cells that are
//! either blocked or walkable at some height. Answers "nearest walkable
//! point within a radius" queries for spawn placement.

use bevy::math::{UVec2, Vec2};
use bevy::prelude::*;

use crate::spawner::core::SurfaceSampler;

/// Uniform walkability grid. Row-major, `Some(height)` = walkable.
#[derive(Resource, Clone)]
pub struct WalkGrid {
    /// World-space XZ of the corner of cell (0, 0).
    pub origin: Vec2,
    /// Side length of a cell in world units.
    pub cell_size: f32,
    /// Cell counts along X and Z.
    pub resolution: UVec2,
    cells: Vec<Option<f32>>,
}

impl WalkGrid {
    /// Build a grid by asking `cell(x, z)` for each cell's walkable height.
    pub fn from_fn(
        origin: Vec2,
        cell_size: f32,
        resolution: UVec2,
        mut cell: impl FnMut(u32, u32) -> Option<f32>,
    ) -> Self {
        let mut cells = Vec::with_capacity((resolution.x * resolution.y) as usize);
        for z in 0..resolution.y {
            for x in 0..resolution.x {
                cells.push(cell(x, z));
            }
        }
        Self { origin, cell_size, resolution, cells }
    }

    #[inline]
    fn cell_at(&self, x: i32, z: i32) -> Option<f32> {
        if x < 0 || z < 0 || x >= self.resolution.x as i32 || z >= self.resolution.y as i32 {
            return None;
        }
        self.cells[(z as u32 * self.resolution.x + x as u32) as usize]
    }

    /// Nearest walkable point within `radius` of `point` (XZ distance),
    /// with Y snapped to the cell's height. `None` when nothing walkable
    /// is in range.
    pub fn sample_walkable(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        let local = Vec2::new(point.x, point.z) - self.origin;
        let cx = (local.x / self.cell_size).floor() as i32;
        let cz = (local.y / self.cell_size).floor() as i32;
        let reach = (radius / self.cell_size).ceil() as i32;

        let mut best: Option<(f32, Vec3)> = None;
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let (gx, gz) = (cx + dx, cz + dz);
                let Some(height) = self.cell_at(gx, gz) else { continue };

                // Nearest point of this cell's rectangle to the query point.
                let min = self.origin + Vec2::new(gx as f32, gz as f32) * self.cell_size;
                let max = min + Vec2::splat(self.cell_size);
                let nx = point.x.clamp(min.x, max.x);
                let nz = point.z.clamp(min.y, max.y);
                let d = Vec2::new(nx - point.x, nz - point.z).length();
                if d > radius {
                    continue;
                }
                if best.map_or(true, |(bd, _)| d < bd) {
                    best = Some((d, Vec3::new(nx, height, nz)));
                }
            }
        }
        best.map(|(_, p)| p)
    }
}

impl SurfaceSampler for WalkGrid {
    fn sample(&self, point: Vec3, search_radius: f32) -> Option<Vec3> {
        self.sample_walkable(point, search_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10x10 cells over world [-5, 5), cells with x < 5 blocked.
    fn half_blocked() -> WalkGrid {
        WalkGrid::from_fn(Vec2::splat(-5.0), 1.0, UVec2::new(10, 10), |x, _z| {
            if x < 5 { None } else { Some(0.0) }
        })
    }

    #[test]
    fn walkable_cell_keeps_xz_and_snaps_height() {
        let grid = WalkGrid::from_fn(Vec2::splat(-5.0), 1.0, UVec2::new(10, 10), |_, _| Some(2.5));
        let p = grid.sample_walkable(Vec3::new(0.3, 9.0, 0.7), 1.0).unwrap();
        assert_eq!(p, Vec3::new(0.3, 2.5, 0.7));
    }

    #[test]
    fn blocked_cell_snaps_to_nearest_walkable_edge() {
        let grid = half_blocked();
        // Nearest walkable world x is 0.0 (cell index 5), 3 units away.
        let p = grid.sample_walkable(Vec3::new(-3.0, 0.0, 0.5), 3.5).unwrap();
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn radius_too_small_finds_nothing() {
        let grid = half_blocked();
        assert!(grid.sample_walkable(Vec3::new(-3.0, 0.0, 0.5), 1.0).is_none());
    }

    #[test]
    fn outside_grid_beyond_radius_finds_nothing() {
        let grid = half_blocked();
        assert!(grid.sample_walkable(Vec3::new(40.0, 0.0, 40.0), 2.0).is_none());
    }
}
