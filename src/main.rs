use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use clap::Parser;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod cli;
mod comet;
mod orbital;
mod scene;
mod ui;
mod visualization;

// Import plugins
use cli::Args;
use comet::CometPlugin;
use orbital::OrbitalPlugin;
use scene::{ActiveScene, ScenePlugin};
use ui::{MainCamera, UiPlugin};
use visualization::VisualizationPlugin;

/// Camera distance relative to the farthest point any body reaches.
const CAMERA_DISTANCE_FACTOR: f32 = 1.8;

// Setup camera framing the whole scene
pub fn setup(mut commands: Commands, scene: Res<ActiveScene>) {
    let initial_distance = scene.0.extent() * CAMERA_DISTANCE_FACTOR;

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,              // Look at the sun
        radius: Some(initial_distance), // Initial distance from focus point
        yaw: Some(0.0),
        pitch: Some(0.45),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.05,
            far: initial_distance * 20.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, initial_distance * 0.45, initial_distance)
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.export {
        match scene::export_scene(args.scene.as_deref(), path) {
            Ok(source) => println!("Wrote {} to {}", source, path.display()),
            Err(e) => {
                eprintln!("Failed to export scene: {e:#}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Solar System".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(PanOrbitCameraPlugin);

    // Add our custom plugins
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(ScenePlugin { arg: args.scene });
    app.add_plugins(CometPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
