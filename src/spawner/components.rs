use bevy::prelude::*;

/// Names a scene entity so manifest placements can reference it
/// (ring centers, fixed spawn posts).
#[derive(Component, Debug, Clone)]
pub struct SpawnAnchor(pub String);

impl SpawnAnchor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marker on every actor the director created. Liveness checks query for it.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnedActor;
