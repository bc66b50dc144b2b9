//! Sun body, its point light and ambient fill

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::scene::ActiveScene;
use crate::visualization::bodies::load_texture;

/// Marker component for the sun sphere
#[derive(Component)]
pub struct Sun;

/// Point light intensity per squared unit of light range.
const LUMENS_PER_RANGE_SQ: f32 = 1_000.0;

/// Spawn the emissive sun at the origin with a point light.
pub fn spawn_sun(
    mut commands: Commands,
    scene: Res<ActiveScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let sun = &scene.0.sun;
    let [r, g, b] = sun.color;
    let color = Color::srgb_u8(r, g, b);

    // Keep the scene readable on the night side of every planet.
    commands.insert_resource(GlobalAmbientLight {
        brightness: 150.0,
        ..default()
    });

    let texture = load_texture(&asset_server, sun.texture.as_deref());
    let material = materials.add(StandardMaterial {
        base_color: if texture.is_some() { Color::WHITE } else { color },
        base_color_texture: texture,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.5).mesh().uv(48, 24))),
        MeshMaterial3d(material),
        Transform::from_scale(Vec3::splat(sun.size)),
        Sun,
        Name::new("Sun"),
    ));

    commands.spawn((
        PointLight {
            color,
            intensity: LUMENS_PER_RANGE_SQ * sun.light_range * sun.light_range,
            range: sun.light_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        Name::new("Sun light"),
    ));
}
