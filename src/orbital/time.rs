//! Simulation clock and control flags

use bevy::prelude::*;

use crate::orbital::store::BodyStore;

/// Explicit simulation controls, read once per frame by the update systems.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub paused: bool,
    pub time_scale: f32,
    pub show_orbits: bool,
    pub tail_enabled: bool,
    /// Simulated seconds elapsed since startup.
    pub elapsed: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            paused: false,
            time_scale: 1.0,
            show_orbits: true,
            tail_enabled: true,
            elapsed: 0.0,
        }
    }
}

impl SimulationState {
    /// Scaled delta for this frame, or `None` while paused.
    pub fn scaled_delta(&self, dt: f32) -> Option<f32> {
        if self.paused {
            None
        } else {
            Some(dt * self.time_scale)
        }
    }
}

/// Advance every body by the frame delta scaled by the current time scale.
pub fn advance_bodies_system(
    time: Res<Time>,
    mut sim: ResMut<SimulationState>,
    mut store: ResMut<BodyStore>,
) {
    let dt = time.delta_secs();
    let Some(scaled) = sim.scaled_delta(dt) else {
        return;
    };
    sim.elapsed += scaled as f64;
    store.advance(dt, sim.time_scale);
}
