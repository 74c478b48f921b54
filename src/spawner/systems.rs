// src/spawner/systems.rs
//! ECS glue for the director: bind the manifest to scene anchors, then
//! advance the director once per frame with world access behind `SpawnHost`.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::spawner::components::{SpawnAnchor, SpawnedActor};
use crate::spawner::core::{ActorPrefab, Placement, SpawnHost, SpawnRule};
use crate::spawner::director::SpawnDirector;
use crate::spawner::manifest::{PlacementDef, SpawnManifest};
use crate::spawner::plugin::{SpawnManifestHandle, SpawnRng};
use crate::walkgrid::WalkGrid;

/// Once the manifest asset is in, resolve its anchor names against the
/// scene's `SpawnAnchor` entities and install the runtime rules.
pub fn bind_manifest(
    manifests: Res<Assets<SpawnManifest>>,
    handle: Res<SpawnManifestHandle>,
    anchors: Query<(Entity, &SpawnAnchor)>,
    mut director: ResMut<SpawnDirector>,
    mut bound: Local<bool>,
) {
    if *bound {
        return;
    }
    let Some(manifest) = manifests.get(&handle.0) else { return };

    let by_name: HashMap<&str, Entity> =
        anchors.iter().map(|(entity, anchor)| (anchor.0.as_str(), entity)).collect();
    let resolve = |name: &str| match by_name.get(name) {
        Some(&entity) => entity,
        None => {
            warn!("spawner: no anchor named '{}'", name);
            Entity::PLACEHOLDER
        }
    };

    let mut rules = Vec::with_capacity(manifest.rules.len());
    for def in &manifest.rules {
        let placement = match &def.placement {
            PlacementDef::Ring { center, radius, radius_jitter } => Placement::Ring {
                center: resolve(center),
                radius: *radius,
                radius_jitter: *radius_jitter,
            },
            PlacementDef::Points { points } => Placement::Points {
                points: points.iter().map(|name| resolve(name)).collect(),
            },
        };
        rules.push(SpawnRule {
            prefab: def.prefab.clone(),
            weight: def.weight,
            placement,
            surface_search: def.surface_search,
        });
    }

    director.spawn_interval = manifest.interval;
    director.max_alive = manifest.max_alive;
    director.rules = rules;
    *bound = true;
    info!(
        "spawner: bound {} rules (interval {:.1}s, max alive {})",
        director.rules.len(),
        director.spawn_interval,
        director.max_alive
    );
}

/// `SpawnHost` over live ECS state. Anchors answer transforms, the marker
/// query answers liveness, `Commands` does the spawning.
pub struct EcsHost<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub assets: &'a AssetServer,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub anchors: &'a Query<'w, 's, &'w GlobalTransform, With<SpawnAnchor>>,
    pub live: &'a Query<'w, 's, (), With<SpawnedActor>>,
}

impl SpawnHost for EcsHost<'_, '_, '_> {
    fn is_alive(&self, actor: Entity) -> bool {
        self.live.contains(actor)
    }

    fn transform_of(&self, reference: Entity) -> Option<(Vec3, Quat)> {
        self.anchors
            .get(reference)
            .ok()
            .map(|global| (global.translation(), global.rotation()))
    }

    fn instantiate(
        &mut self,
        prefab: &ActorPrefab,
        position: Vec3,
        rotation: Quat,
    ) -> Option<Entity> {
        let transform = Transform { translation: position, rotation, ..default() };
        let vis_components = (
            Visibility::Visible,
            InheritedVisibility::VISIBLE,
            ViewVisibility::default(),
        );

        let entity = match prefab {
            ActorPrefab::Scene { path } => {
                let scene: Handle<Scene> = self.assets.load(path.as_str());
                self.commands
                    .spawn((
                        transform,
                        GlobalTransform::IDENTITY,
                        vis_components,
                        SceneRoot(scene),
                        SpawnedActor,
                    ))
                    .id()
            }
            ActorPrefab::Pill { radius, length, color } => {
                let mesh = self.meshes.add(Capsule3d::new(*radius, *length));
                let material = self.materials.add(StandardMaterial {
                    base_color: Color::srgb(color[0], color[1], color[2]),
                    ..default()
                });
                self.commands
                    .spawn((
                        transform,
                        GlobalTransform::IDENTITY,
                        vis_components,
                        Mesh3d(mesh),
                        MeshMaterial3d(material),
                        SpawnedActor,
                    ))
                    .id()
            }
        };
        Some(entity)
    }
}

/// Per-frame drive of the director.
pub fn advance_spawner<'w, 's>(
    time: Res<Time>,
    grid: Res<WalkGrid>,
    mut rng: ResMut<SpawnRng>,
    mut director: ResMut<SpawnDirector>,
    mut commands: Commands<'w, 's>,
    assets: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    anchors: Query<'w, 's, &'w GlobalTransform, With<SpawnAnchor>>,
    live: Query<'w, 's, (), With<SpawnedActor>>,
) {
    let mut host = EcsHost {
        commands: &mut commands,
        assets: &assets,
        meshes: &mut meshes,
        materials: &mut materials,
        anchors: &anchors,
        live: &live,
    };
    if let Some(actor) = director.advance(time.delta_secs(), &mut rng.0, &mut host, &*grid) {
        debug!("spawner: {:?} joins {} live actors", actor, director.alive_count());
    }
}
