//! User interface module
//!
//! This module handles keyboard controls, the status and help overlay, and
//! the name labels that follow bodies on screen.

use bevy::prelude::*;

pub mod input;
pub mod overlay;
pub mod state;

pub use input::keyboard_input_system;
pub use state::UiState;

use crate::orbital::SimSystems;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(Startup, overlay::setup_overlay)
            .add_systems(Update, keyboard_input_system.in_set(SimSystems::Input))
            .add_systems(
                Update,
                (
                    overlay::update_status_text_system,
                    overlay::update_help_visibility_system,
                    overlay::update_body_labels_system,
                )
                    .in_set(SimSystems::Present),
            );
    }
}
