//! Entity creation for the active scene

use bevy::prelude::*;

use crate::comet::{Comet, CometTail, CometTrail, PuffTrail};
use crate::orbital::{BodyStore, SimulationState};
use crate::scene::ActiveScene;
use crate::scene::types::{BodyDescription, BodyKind, TailDescription};
use crate::visualization::bodies::{
    body_material, load_texture, ring_base_rotation, ring_material,
};
use crate::visualization::{OrbitLine, OrbitalBody, RingMesh};

/// Spawn one entity per body, plus orbit lines and comet trails.
pub fn spawn_bodies(
    mut commands: Commands,
    scene: Res<ActiveScene>,
    sim: Res<SimulationState>,
    store: Res<BodyStore>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let sphere = meshes.add(Sphere::new(0.5).mesh().uv(32, 18));

    for (index, desc) in scene.0.bodies.iter().enumerate() {
        let Some(entry) = store.items.get(index) else {
            warn!("spawn_bodies: no store entry for '{}'", desc.name);
            continue;
        };
        let position = entry.world_position;

        match desc.kind {
            BodyKind::Sphere => {
                let texture = load_texture(&asset_server, desc.texture.as_deref());
                let material = materials.add(body_material(desc.body_color(), texture));
                let mut body = commands.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position)
                        .with_rotation(entry.body.spin_rotation())
                        .with_scale(Vec3::splat(desc.size)),
                    OrbitalBody { index },
                    Name::new(desc.name.clone()),
                ));
                if let Some(trail) = comet_trail(desc, sim.tail_enabled) {
                    body.insert((Comet { body_index: index }, trail));
                }
            }
            BodyKind::Ring { inner, outer } => {
                let tilt = entry
                    .parent
                    .and_then(|p| store.items.get(p))
                    .map(|p| p.body.plane_rotation())
                    .unwrap_or(Quat::IDENTITY);
                let mesh = meshes.add(Annulus::new(inner, outer).mesh().resolution(64));
                commands.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(materials.add(ring_material(desc.body_color()))),
                    Transform::from_translation(position).with_rotation(tilt * ring_base_rotation()),
                    RingMesh { index },
                    Name::new(desc.name.clone()),
                ));
            }
        }

        if desc.has_orbit_line() {
            let path = desc.orbit_path();
            debug!("Orbit line for '{}' with {} points", desc.name, path.len());
            commands.spawn((
                OrbitLine {
                    body_index: index,
                    path,
                    color: desc.orbit_line_color(),
                },
                Name::new(format!("{} orbit", desc.name)),
            ));
        }
    }

    info!(
        "Spawned {} bodies for scene '{}'",
        scene.0.bodies.len(),
        scene.0.title
    );
}

fn comet_trail(desc: &BodyDescription, enabled: bool) -> Option<CometTrail> {
    match desc.tail? {
        TailDescription::Decaying(config) => {
            Some(CometTrail::Decaying(CometTail::new(config, enabled)))
        }
        TailDescription::Puffs(config) => Some(CometTrail::Puffs(PuffTrail::new(config, enabled))),
    }
}
