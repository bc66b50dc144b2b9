//! Comet trail systems and the entity-backed marker host

use bevy::prelude::*;

use crate::comet::host::{MarkerKind, VisualHost};
use crate::comet::puffs::PuffTrail;
use crate::comet::tail::CometTail;
use crate::orbital::{BodyStore, SimulationState};

/// Links a comet entity to its entry in the body store.
#[derive(Component, Copy, Clone, Debug)]
pub struct Comet {
    pub body_index: usize,
}

/// Trail effect attached to a comet entity.
#[derive(Component, Debug)]
pub enum CometTrail {
    Decaying(CometTail<Entity>),
    Puffs(PuffTrail<Entity>),
}

impl CometTrail {
    fn set_enabled(&mut self, enabled: bool, host: &mut EntityHost<'_, '_, '_>) -> bool {
        match self {
            CometTrail::Decaying(tail) => tail.set_enabled(enabled, host),
            CometTrail::Puffs(puffs) => puffs.set_enabled(enabled, host),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CometTrail::Decaying(tail) => tail.len(),
            CometTrail::Puffs(puffs) => puffs.len(),
        }
    }
}

/// Marker component for trail entities
#[derive(Component)]
pub struct TrailMarkerEntity;

/// Shared mesh for trail markers
#[derive(Resource)]
pub struct MarkerAssets {
    pub mesh: Handle<Mesh>,
}

pub fn setup_marker_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mesh = meshes.add(Sphere::new(0.5).mesh().uv(12, 8));
    commands.insert_resource(MarkerAssets { mesh });
}

/// Spawns and despawns marker entities through `Commands`.
pub struct EntityHost<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub mesh: Handle<Mesh>,
}

impl VisualHost for EntityHost<'_, '_, '_> {
    type Handle = Entity;

    fn create(&mut self, kind: MarkerKind, transform: Transform, color: Color) -> Entity {
        let material = self.materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        let name = match kind {
            MarkerKind::TailDot => "Tail marker",
            MarkerKind::Puff => "Trail puff",
        };
        self.commands
            .spawn((
                Mesh3d(self.mesh.clone()),
                MeshMaterial3d(material),
                transform,
                TrailMarkerEntity,
                Name::new(name),
            ))
            .id()
    }

    fn update(&mut self, handle: Entity, transform: Transform) {
        self.commands.entity(handle).insert(transform);
    }

    fn destroy(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }
}

/// System to apply the tail toggle and feed every comet's trail with its
/// resolved position
pub fn update_comet_trails_system(
    mut commands: Commands,
    time: Res<Time>,
    sim: Res<SimulationState>,
    store: Res<BodyStore>,
    assets: Res<MarkerAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut comets: Query<(&Comet, &mut CometTrail)>,
) {
    let mut host = EntityHost {
        commands: &mut commands,
        materials: &mut materials,
        mesh: assets.mesh.clone(),
    };

    for (comet, mut trail) in &mut comets {
        let Some(entry) = store.get(comet.body_index) else {
            warn!(
                "update_comet_trails_system: no body at index {}",
                comet.body_index
            );
            continue;
        };

        let alive = trail.len();
        if trail.set_enabled(sim.tail_enabled, &mut host) {
            if sim.tail_enabled {
                debug!("Trail of {} enabled", entry.body.name);
            } else {
                debug!("Trail of {} cleared ({} markers)", entry.body.name, alive);
            }
        }

        if sim.paused {
            continue;
        }

        match &mut *trail {
            CometTrail::Decaying(tail) => {
                tail.update(
                    &mut host,
                    entry.world_position,
                    entry.body.radius(),
                    entry.body.shape.semi_major_axis(),
                );
            }
            CometTrail::Puffs(puffs) => {
                puffs.update(
                    &mut host,
                    time.delta_secs(),
                    entry.world_position,
                    entry.body.visual_size,
                );
            }
        }
    }
}
