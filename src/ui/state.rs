//! UI state management

use bevy::prelude::*;

/// Main UI state resource
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct UiState {
    pub show_help: bool,
    pub show_status: bool,
    /// Screen-space name labels next to bodies.
    pub show_labels: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_help: true,
            show_status: true,
            show_labels: true,
        }
    }
}
