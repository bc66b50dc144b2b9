//! Orbital mechanics module
//!
//! This module handles circular and elliptical orbit kinematics, the body
//! tree that chains moons and rings to their parents, orbit path sampling
//! and the simulation controls.

use bevy::prelude::*;

pub mod kinematics;
pub mod path;
pub mod store;
pub mod time;

pub use kinematics::{OrbitShape, OrbitingBody, PhaseMode};
pub use path::OrbitPath;
pub use store::BodyStore;
pub use time::{SimulationState, advance_bodies_system};

/// Frame phases, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSystems {
    /// Keyboard handling that mutates `SimulationState`.
    Input,
    /// Kinematics and world position resolution.
    Advance,
    /// Comet tails and other effects that read resolved positions.
    Effects,
    /// Transforms, orbit lines, overlay text.
    Present,
}

/// Plugin for orbital mechanics and simulation time
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationState>()
            .init_resource::<BodyStore>()
            .configure_sets(
                Update,
                (
                    SimSystems::Input,
                    SimSystems::Advance,
                    SimSystems::Effects,
                    SimSystems::Present,
                )
                    .chain(),
            )
            .add_systems(Update, advance_bodies_system.in_set(SimSystems::Advance));
    }
}
