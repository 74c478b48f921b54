// src/spawner/core.rs
//! Core types/traits for the enemy spawn director.
//! Keep this file dependency-light; it should compile before any system/plugin impls.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------- Prefabs ----------

/// Visual template for a spawned actor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ActorPrefab {
    /// A glTF scene spawned by asset path.
    Scene { path: String },
    /// A capsule primitive, for prototyping without art.
    Pill { radius: f32, length: f32, color: [f32; 3] },
}

// ---------- Rules ----------

/// How a rule places its actor.
#[derive(Clone, Debug)]
pub enum Placement {
    /// Random point on the perimeter of a circle around `center`.
    Ring { center: Entity, radius: f32, radius_jitter: f32 },
    /// One of a fixed set of authored anchor entities.
    Points { points: Vec<Entity> },
}

/// One configured way of placing and spawning an actor.
#[derive(Clone, Debug)]
pub struct SpawnRule {
    /// Template to instantiate. A rule without one never produces an actor.
    pub prefab: Option<ActorPrefab>,
    /// Relative selection probability. Values <= 0 are never rolled directly.
    pub weight: f32,
    pub placement: Placement,
    /// Search radius for the walkable-surface snap. 0 makes the snap likely to fail.
    pub surface_search: f32,
}

// ---------- Traits: surface query, world access ----------

/// Walkable-surface query: the nearest walkable point within `search_radius`
/// of `point`, if any.
pub trait SurfaceSampler {
    fn sample(&self, point: Vec3, search_radius: f32) -> Option<Vec3>;
}

/// World access the director needs: liveness checks, anchor transforms,
/// actor instantiation. The game impl wraps ECS queries + `Commands`;
/// tests substitute in-memory fakes.
pub trait SpawnHost {
    /// Does the referent of `actor` still exist?
    fn is_alive(&self, actor: Entity) -> bool;
    /// Current position + orientation of an anchor entity, if it exists.
    fn transform_of(&self, reference: Entity) -> Option<(Vec3, Quat)>;
    /// Create an actor from `prefab` at the given pose.
    fn instantiate(&mut self, prefab: &ActorPrefab, position: Vec3, rotation: Quat)
        -> Option<Entity>;
}
