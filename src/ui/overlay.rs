//! Status line, help text and body name labels

use bevy::prelude::*;

use crate::orbital::{BodyStore, SimulationState};
use crate::scene::{ActiveScene, BodyKind, ControlScheme};
use crate::ui::MainCamera;
use crate::ui::state::UiState;

/// Marker for the status line text node
#[derive(Component)]
pub struct StatusText;

/// Marker for the help text node
#[derive(Component)]
pub struct HelpText;

/// Screen-space label that follows one body.
#[derive(Component, Debug)]
pub struct BodyLabel {
    pub body_index: usize,
    /// World-space lift above the body's centre.
    pub lift: f32,
}

const SIMULATOR_HELP: &str = "Camera: left drag orbit, right drag pan, wheel zoom\n\
Simulation: 1-5 speed, Space pause\n\
O orbits on/off, T comet tail, L labels, I status, H help";

const CLASSIC_HELP: &str = "Camera: left drag orbit, right drag pan, wheel zoom\n\
Hold Right/Left to speed up/slow down, hold Space to reset\n\
F orbits on/off, I status, H help";

pub fn help_text(scheme: ControlScheme) -> &'static str {
    match scheme {
        ControlScheme::Simulator => SIMULATOR_HELP,
        ControlScheme::Classic => CLASSIC_HELP,
    }
}

/// Time scale without trailing zeros: `1`, `0.5`, `1.3`.
pub fn format_scale(scale: f32) -> String {
    let text = format!("{:.2}", scale);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On" } else { "Off" }
}

pub fn format_status(sim: &SimulationState) -> String {
    format!(
        "Speed: x{} | Paused: {} | Orbits: {} | Tail: {}",
        format_scale(sim.time_scale),
        if sim.paused { "Yes" } else { "No" },
        on_off(sim.show_orbits),
        on_off(sim.tail_enabled)
    )
}

pub fn setup_overlay(mut commands: Commands, scene: Res<ActiveScene>, store: Res<BodyStore>) {
    commands.spawn((
        Text::new(help_text(scene.0.controls)),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        HelpText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(76.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));

    // Only the simulator scheme names its bodies.
    if scene.0.controls != ControlScheme::Simulator {
        return;
    }
    for (index, desc) in scene.0.bodies.iter().enumerate() {
        if !matches!(desc.kind, BodyKind::Sphere) || store.get(index).is_none() {
            continue;
        }
        commands.spawn((
            Text::new(desc.name.clone()),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            BodyLabel {
                body_index: index,
                lift: desc.size * 0.6 + 0.2,
            },
        ));
    }
}

/// System to rebuild the status line each frame
pub fn update_status_text_system(
    sim: Res<SimulationState>,
    ui: Res<UiState>,
    mut status: Query<(&mut Text, &mut Visibility), With<StatusText>>,
) {
    for (mut text, mut visibility) in &mut status {
        text.0 = format_status(&sim);
        *visibility = if ui.show_status {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn update_help_visibility_system(
    ui: Res<UiState>,
    mut help: Query<&mut Visibility, With<HelpText>>,
) {
    if !ui.is_changed() {
        return;
    }
    for mut visibility in &mut help {
        *visibility = if ui.show_help {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// System to place labels next to their bodies in screen space
pub fn update_body_labels_system(
    ui: Res<UiState>,
    store: Res<BodyStore>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut labels: Query<(&BodyLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (label, mut node, mut visibility) in &mut labels {
        let screen = store
            .get(label.body_index)
            .filter(|_| ui.show_labels)
            .and_then(|entry| {
                let anchor = entry.world_position + Vec3::Y * label.lift;
                camera.world_to_viewport(camera_transform, anchor).ok()
            });
        match screen {
            Some(pos) => {
                node.left = Val::Px(pos.x + 6.0);
                node.top = Val::Px(pos.y - 8.0);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scale() {
        assert_eq!(format_scale(1.0), "1");
        assert_eq!(format_scale(0.5), "0.5");
        assert_eq!(format_scale(8.0), "8");
        assert_eq!(format_scale(1.0 + 0.1 + 0.1 + 0.1), "1.3");
        assert_eq!(format_scale(-0.4), "-0.4");
        assert_eq!(format_scale(-0.0001), "0");
        assert_eq!(format_scale(10.0), "10");
    }

    #[test]
    fn test_status_line() {
        let mut sim = SimulationState::default();
        assert_eq!(
            format_status(&sim),
            "Speed: x1 | Paused: No | Orbits: On | Tail: On"
        );
        sim.time_scale = 0.5;
        sim.paused = true;
        sim.show_orbits = false;
        sim.tail_enabled = false;
        assert_eq!(
            format_status(&sim),
            "Speed: x0.5 | Paused: Yes | Orbits: Off | Tail: Off"
        );
    }

    #[test]
    fn test_help_mentions_scheme_keys() {
        assert!(help_text(ControlScheme::Simulator).contains("1-5"));
        assert!(help_text(ControlScheme::Simulator).contains("L labels"));
        assert!(help_text(ControlScheme::Classic).contains("F orbits"));
        assert!(!help_text(ControlScheme::Classic).contains("labels"));
    }

    #[test]
    fn test_status_text_follows_state() {
        let mut app = App::new();
        app.init_resource::<SimulationState>();
        app.init_resource::<UiState>();
        let entity = app
            .world_mut()
            .spawn((Text::new(""), Visibility::Inherited, StatusText))
            .id();
        app.add_systems(Update, update_status_text_system);

        app.world_mut().resource_mut::<SimulationState>().time_scale = 4.0;
        app.update();
        let text = app.world().get::<Text>(entity).unwrap();
        assert!(text.0.starts_with("Speed: x4 |"), "{}", text.0);

        app.world_mut().resource_mut::<UiState>().show_status = false;
        app.update();
        assert_eq!(
            app.world().get::<Visibility>(entity),
            Some(&Visibility::Hidden)
        );
    }
}
