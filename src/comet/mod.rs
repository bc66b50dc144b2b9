//! Comet effects module
//!
//! Trail managers for comets and the glue that turns their markers into
//! entities.

use bevy::prelude::*;

pub mod host;
pub mod puffs;
pub mod systems;
pub mod tail;

pub use puffs::{PuffConfig, PuffTrail};
pub use systems::{Comet, CometTrail, update_comet_trails_system};
pub use tail::{CometTail, TailConfig};

use crate::orbital::SimSystems;

/// Plugin for comet trails
pub struct CometPlugin;

impl Plugin for CometPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::setup_marker_assets)
            .add_systems(
                Update,
                update_comet_trails_system.in_set(SimSystems::Effects),
            );
    }
}
