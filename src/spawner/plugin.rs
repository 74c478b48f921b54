//! Spawner plugin wiring (glue).
//! - Manifest asset/loader
//! - Settings + RNG seeding
//! - Bind + advance systems

use bevy::ecs::schedule::common_conditions::resource_exists;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::spawner::director::SpawnDirector;
use crate::spawner::manifest::{SpawnManifest, SpawnManifestAssetPlugin};
use crate::spawner::systems::{advance_spawner, bind_manifest};
use crate::state::GameState;
use crate::walkgrid::WalkGrid;

/// Configure where the spawn manifest lives and the RNG seed.
#[derive(Resource, Clone)]
pub struct SpawnerSettings {
    pub manifest_path: String,
    pub seed: u64,
}
impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            manifest_path: "spawner/arena.spawn.ron".to_string(),
            seed: 0xC0FFEE,
        }
    }
}

/// Handle to the loaded SpawnManifest asset.
#[derive(Resource, Default)]
pub struct SpawnManifestHandle(pub Handle<SpawnManifest>);

/// Shared RNG for every spawn draw (rule roll, angle, jitter, point pick).
/// Seeded from settings so a run can be reproduced.
#[derive(Resource)]
pub struct SpawnRng(pub ChaCha8Rng);

pub struct SpawnerPlugin;
impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SpawnManifestAssetPlugin)
            .init_resource::<SpawnerSettings>()
            .init_resource::<SpawnManifestHandle>()
            .init_resource::<SpawnDirector>()
            .add_systems(Startup, (init_spawn_rng, load_manifest))
            .add_systems(
                Update,
                (
                    bind_manifest,
                    advance_spawner
                        .after(bind_manifest)
                        .run_if(resource_exists::<WalkGrid>)
                        .run_if(in_state(GameState::Running)),
                ),
            );
    }
}

/// Startup: seed the shared RNG from settings.
fn init_spawn_rng(mut commands: Commands, settings: Res<SpawnerSettings>) {
    commands.insert_resource(SpawnRng(ChaCha8Rng::seed_from_u64(settings.seed)));
}

/// Startup: request loading the manifest, store the handle.
fn load_manifest(
    mut handle_res: ResMut<SpawnManifestHandle>,
    settings: Res<SpawnerSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() {
        return;
    }
    let h: Handle<SpawnManifest> = assets.load(settings.manifest_path.as_str());
    handle_res.0 = h;
    info!(
        "spawner: loading manifest from '{}', seed={}",
        settings.manifest_path, settings.seed
    );
}
