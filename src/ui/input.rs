//! Keyboard controls for both control schemes

use bevy::prelude::*;

use crate::orbital::SimulationState;
use crate::scene::{ActiveScene, ControlScheme};
use crate::ui::state::UiState;

/// Step applied per frame while an arrow key is held in the classic scheme.
pub const CLASSIC_SCALE_STEP: f32 = 0.1;

/// Time scales bound to the number keys in the simulator scheme.
pub const PRESET_SCALES: [(KeyCode, f32); 5] = [
    (KeyCode::Digit1, 0.5),
    (KeyCode::Digit2, 1.0),
    (KeyCode::Digit3, 2.0),
    (KeyCode::Digit4, 4.0),
    (KeyCode::Digit5, 8.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimCommand {
    SetTimeScale(f32),
    NudgeTimeScale(f32),
    ResetTimeScale,
    TogglePause,
    ToggleOrbits,
    ToggleTail,
    ToggleHelp,
    ToggleStatus,
    ToggleLabels,
}

/// Translate this frame's key state into commands for the given scheme.
pub fn commands_for(scheme: ControlScheme, keys: &ButtonInput<KeyCode>) -> Vec<SimCommand> {
    let mut out = Vec::new();
    match scheme {
        ControlScheme::Simulator => {
            for (key, scale) in PRESET_SCALES {
                if keys.just_pressed(key) {
                    out.push(SimCommand::SetTimeScale(scale));
                }
            }
            if keys.just_pressed(KeyCode::Space) {
                out.push(SimCommand::TogglePause);
            }
            if keys.just_pressed(KeyCode::KeyO) {
                out.push(SimCommand::ToggleOrbits);
            }
            if keys.just_pressed(KeyCode::KeyT) {
                out.push(SimCommand::ToggleTail);
            }
            if keys.just_pressed(KeyCode::KeyH) {
                out.push(SimCommand::ToggleHelp);
            }
            if keys.just_pressed(KeyCode::KeyI) {
                out.push(SimCommand::ToggleStatus);
            }
            if keys.just_pressed(KeyCode::KeyL) {
                out.push(SimCommand::ToggleLabels);
            }
        }
        ControlScheme::Classic => {
            // Held keys act every frame.
            if keys.pressed(KeyCode::ArrowRight) {
                out.push(SimCommand::NudgeTimeScale(CLASSIC_SCALE_STEP));
            }
            if keys.pressed(KeyCode::ArrowLeft) {
                out.push(SimCommand::NudgeTimeScale(-CLASSIC_SCALE_STEP));
            }
            if keys.pressed(KeyCode::Space) {
                out.push(SimCommand::ResetTimeScale);
            }
            if keys.just_pressed(KeyCode::KeyF) {
                out.push(SimCommand::ToggleOrbits);
            }
            if keys.just_pressed(KeyCode::KeyH) {
                out.push(SimCommand::ToggleHelp);
            }
            if keys.just_pressed(KeyCode::KeyI) {
                out.push(SimCommand::ToggleStatus);
            }
        }
    }
    out
}

pub fn apply_command(command: SimCommand, sim: &mut SimulationState, ui: &mut UiState) {
    match command {
        SimCommand::SetTimeScale(scale) => {
            sim.time_scale = scale;
            info!("Time scale set to x{}", scale);
        }
        SimCommand::NudgeTimeScale(step) => sim.time_scale += step,
        SimCommand::ResetTimeScale => sim.time_scale = 1.0,
        SimCommand::TogglePause => {
            sim.paused = !sim.paused;
            info!("Simulation {}", if sim.paused { "paused" } else { "resumed" });
        }
        SimCommand::ToggleOrbits => {
            sim.show_orbits = !sim.show_orbits;
            info!("Orbit lines {}", if sim.show_orbits { "on" } else { "off" });
        }
        SimCommand::ToggleTail => {
            sim.tail_enabled = !sim.tail_enabled;
            info!("Comet tail {}", if sim.tail_enabled { "on" } else { "off" });
        }
        SimCommand::ToggleHelp => ui.show_help = !ui.show_help,
        SimCommand::ToggleStatus => ui.show_status = !ui.show_status,
        SimCommand::ToggleLabels => {
            ui.show_labels = !ui.show_labels;
            info!("Body labels {}", if ui.show_labels { "on" } else { "off" });
        }
    }
}

/// System to handle keyboard input for the active control scheme
pub fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    scene: Res<ActiveScene>,
    mut sim: ResMut<SimulationState>,
    mut ui: ResMut<UiState>,
) {
    for command in commands_for(scene.0.controls, &keys) {
        apply_command(command, &mut sim, &mut ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_keys() {
        let mut sim = SimulationState::default();
        let mut ui = UiState::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyI);
        keys.press(KeyCode::KeyL);
        let commands = commands_for(ControlScheme::Simulator, &keys);
        assert_eq!(
            commands,
            vec![SimCommand::ToggleStatus, SimCommand::ToggleLabels]
        );
        for command in commands {
            apply_command(command, &mut sim, &mut ui);
        }
        assert!(!ui.show_status);
        assert!(!ui.show_labels);
        assert!(ui.show_help);

        // Classic scenes have no labels, only the status toggle.
        assert_eq!(
            commands_for(ControlScheme::Classic, &keys),
            vec![SimCommand::ToggleStatus]
        );
    }

    #[test]
    fn test_simulator_keys() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Digit3);
        keys.press(KeyCode::Space);
        keys.press(KeyCode::KeyT);
        assert_eq!(
            commands_for(ControlScheme::Simulator, &keys),
            vec![
                SimCommand::SetTimeScale(2.0),
                SimCommand::TogglePause,
                SimCommand::ToggleTail
            ]
        );
        // Classic ignores number keys and treats Space as a held reset.
        assert_eq!(
            commands_for(ControlScheme::Classic, &keys),
            vec![SimCommand::ResetTimeScale]
        );
    }

    #[test]
    fn test_toggles_fire_once_per_press() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyO);
        assert_eq!(commands_for(ControlScheme::Simulator, &keys).len(), 1);
        keys.clear();
        // Still held, but no longer just pressed.
        assert!(commands_for(ControlScheme::Simulator, &keys).is_empty());
    }

    #[test]
    fn test_classic_held_arrows_nudge_every_frame() {
        let mut sim = SimulationState::default();
        let mut ui = UiState::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowLeft);
        for _ in 0..15 {
            for command in commands_for(ControlScheme::Classic, &keys) {
                apply_command(command, &mut sim, &mut ui);
            }
            keys.clear();
        }
        // Time runs backwards once the scale drops below zero.
        assert!((sim.time_scale + 0.5).abs() < 1e-4, "{}", sim.time_scale);

        apply_command(SimCommand::ResetTimeScale, &mut sim, &mut ui);
        assert_eq!(sim.time_scale, 1.0);
    }

    #[test]
    fn test_apply_toggles() {
        let mut sim = SimulationState::default();
        let mut ui = UiState::default();
        apply_command(SimCommand::TogglePause, &mut sim, &mut ui);
        apply_command(SimCommand::ToggleOrbits, &mut sim, &mut ui);
        apply_command(SimCommand::ToggleTail, &mut sim, &mut ui);
        apply_command(SimCommand::ToggleHelp, &mut sim, &mut ui);
        assert!(sim.paused);
        assert!(!sim.show_orbits);
        assert!(!sim.tail_enabled);
        assert!(!ui.show_help);
        apply_command(SimCommand::SetTimeScale(8.0), &mut sim, &mut ui);
        assert_eq!(sim.time_scale, 8.0);
    }
}
