// src/spawner/manifest.rs
//! Data-driven spawn rules + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::core::ActorPrefab;

// ---------- Public plugin to register asset+loader ----------

pub struct SpawnManifestAssetPlugin;

impl Plugin for SpawnManifestAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SpawnManifest>()
            .register_asset_loader(SpawnManifestLoader);
    }
}

// ---------- Placement (data form) ----------

/// Placement written in the manifest. Anchor entities are referenced by the
/// name on their `SpawnAnchor` component and resolved at bind time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PlacementDef {
    Ring {
        center: String,
        #[serde(default = "default_ring_radius")]
        radius: f32,
        #[serde(default)]
        radius_jitter: f32,
    },
    Points {
        points: Vec<String>,
    },
}

fn default_ring_radius() -> f32 {
    40.0
}

// ---------- Rule definition (data form) ----------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnRuleDef {
    /// Unique human-readable name (used for duplicate checks and logs).
    pub name: String,

    /// Template to instantiate. A rule without one never spawns.
    #[serde(default)]
    pub prefab: Option<ActorPrefab>,

    /// Relative selection weight. <= 0 means never rolled directly.
    #[serde(default = "default_weight")]
    pub weight: f32,

    pub placement: PlacementDef,

    /// Walkable-surface search radius; 4-8 works well, 0 mostly fails.
    #[serde(default = "default_surface_search")]
    pub surface_search: f32,
}

fn default_weight() -> f32 {
    1.0
}
fn default_surface_search() -> f32 {
    6.0
}

// ---------- Runtime manifest asset ----------

#[derive(Asset, TypePath, Clone, Serialize, Deserialize)]
pub struct SpawnManifest {
    /// Seconds between spawn attempts.
    #[serde(default = "default_interval")]
    pub interval: f32,
    /// Cap on simultaneously live spawned actors.
    #[serde(default = "default_max_alive")]
    pub max_alive: usize,
    pub rules: Vec<SpawnRuleDef>,
}

fn default_interval() -> f32 {
    2.0
}
fn default_max_alive() -> usize {
    30
}

/// Parse and validate manifest bytes.
pub fn parse_manifest(bytes: &[u8]) -> Result<SpawnManifest, SpawnManifestLoadError> {
    let manifest: SpawnManifest =
        ron::de::from_bytes(bytes).map_err(|e| SpawnManifestLoadError::Ron(e.to_string()))?;

    let mut seen = HashSet::new();
    for rule in &manifest.rules {
        if !seen.insert(rule.name.as_str()) {
            return Err(SpawnManifestLoadError::DuplicateName { name: rule.name.clone() });
        }
    }
    Ok(manifest)
}

// ---------- Asset loader for `.spawn.ron` ----------

#[derive(Default)]
pub struct SpawnManifestLoader;

impl AssetLoader for SpawnManifestLoader {
    type Asset = SpawnManifest;
    type Settings = ();
    type Error = SpawnManifestLoadError;

    fn extensions(&self) -> &[&str] {
        &["spawn.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_manifest(&bytes)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum SpawnManifestLoadError {
    #[error("I/O while reading spawn manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Duplicate rule name '{name}'")]
    DuplicateName { name: String },
}
