use bevy::math::{UVec2, Vec2};
use bevy::prelude::*;

use crate::spawner::components::SpawnAnchor;
use crate::walkgrid::WalkGrid;

/// Eight perimeter posts, counter-clockwise from east.
const POST_NAMES: [&str; 8] = [
    "post_e", "post_ne", "post_n", "post_nw", "post_w", "post_sw", "post_s", "post_se",
];
const POST_RADIUS: f32 = 18.0;

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 1) Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30.0, 60.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 2) Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 70.0, 85.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 3) Arena floor
    let floor = meshes.add(Plane3d::default().mesh().size(120.0, 120.0));
    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.42, 0.3),
        ..default()
    });
    commands.spawn((
        Mesh3d(floor),
        MeshMaterial3d(floor_mat),
        Transform::IDENTITY,
        GlobalTransform::IDENTITY,
    ));

    // 4) Walkability: the whole floor minus a blocked outer rim, so ring
    //    spawns near the edge snap inward instead of landing off the arena.
    let grid = WalkGrid::from_fn(Vec2::splat(-60.0), 1.0, UVec2::new(120, 120), |x, z| {
        if x < 2 || z < 2 || x > 117 || z > 117 {
            None
        } else {
            Some(0.0)
        }
    });
    commands.insert_resource(grid);

    // 5) Spawn anchors: the ring center plus the perimeter posts, facing in.
    commands.spawn((
        Transform::IDENTITY,
        GlobalTransform::IDENTITY,
        SpawnAnchor::new("arena_center"),
    ));
    for (i, name) in POST_NAMES.iter().enumerate() {
        let angle = i as f32 * std::f32::consts::FRAC_PI_4;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * POST_RADIUS;
        commands.spawn((
            Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            GlobalTransform::IDENTITY,
            SpawnAnchor::new(*name),
        ));
    }
}
