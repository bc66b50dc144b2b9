//! Visualization module
//!
//! This module handles rendering of the sun, body meshes and rings, and the
//! orbit lines drawn with gizmos.

use bevy::prelude::*;

pub mod bodies;
pub mod lighting;
pub mod orbit_lines;

pub use bodies::{OrbitalBody, RingMesh, sync_body_transforms_system};
pub use orbit_lines::{OrbitLine, draw_orbit_lines_system};

use crate::orbital::SimSystems;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, lighting::spawn_sun)
            .add_systems(
                Update,
                (sync_body_transforms_system, draw_orbit_lines_system).in_set(SimSystems::Present),
            );
    }
}
