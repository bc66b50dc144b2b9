//! Orbit line rendering with gizmos
//!
//! Each orbit keeps its precomputed polyline in its own plane; drawing applies
//! the body's tilt and, for moons, the parent's current position.

use bevy::prelude::*;

use crate::orbital::{BodyStore, OrbitPath, SimulationState};

/// Precomputed orbit polyline for one body.
#[derive(Component, Debug, Clone)]
pub struct OrbitLine {
    pub body_index: usize,
    pub path: OrbitPath,
    pub color: Color,
}

/// World-space points of an orbit line.
pub fn world_points<'a>(
    path: &'a OrbitPath,
    rotation: Quat,
    origin: Vec3,
) -> impl Iterator<Item = Vec3> + 'a {
    path.points.iter().map(move |p| origin + rotation * *p)
}

/// System to draw visible orbit lines
pub fn draw_orbit_lines_system(
    mut gizmos: Gizmos,
    sim: Res<SimulationState>,
    store: Res<BodyStore>,
    lines: Query<&OrbitLine>,
) {
    if !sim.show_orbits {
        return;
    }

    for line in lines.iter() {
        let Some(entry) = store.get(line.body_index) else {
            continue;
        };
        gizmos.linestrip(
            world_points(&line.path, entry.body.plane_rotation(), entry.focus(&store)),
            line.color,
        );
    }
}
