//! Scene module
//!
//! Scene descriptions, the built-in presets, JSON loading, and the plugin
//! that turns the active scene into resources and entities.

use anyhow::Result;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::path::Path;

pub mod loader;
pub mod presets;
pub mod spawn;
pub mod types;

pub use loader::SceneSource;
pub use types::{BodyKind, ControlScheme, SceneDescription};

use crate::orbital::{BodyStore, SimulationState};

/// The scene currently shown, ordered parent-first.
#[derive(Resource, Clone, Debug)]
pub struct ActiveScene(pub SceneDescription);

/// Plugin that loads a scene and spawns it at startup
pub struct ScenePlugin {
    /// Preset name or path to a JSON scene; `None` uses the config directory
    /// or the default preset.
    pub arg: Option<String>,
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let source = loader::resolve_source(self.arg.as_deref(), loader::config_dir().as_deref());
        let (scene, store) = load_or_default(&source);
        info!(
            "Loaded scene '{}' from {} with {} bodies",
            scene.title,
            source,
            store.len()
        );

        let sim = SimulationState {
            time_scale: scene.time_scale,
            ..default()
        };
        app.insert_resource(sim)
            .insert_resource(store)
            .insert_resource(ActiveScene(scene))
            .add_systems(Startup, (set_window_title, spawn::spawn_bodies));
    }
}

fn load_scene(source: &SceneSource) -> Result<(SceneDescription, BodyStore)> {
    let scene = loader::load(source)?;
    let store = scene.build_store()?;
    Ok((scene, store))
}

/// Load `source`, falling back to the default preset when it cannot be used.
pub fn load_or_default(source: &SceneSource) -> (SceneDescription, BodyStore) {
    match load_scene(source) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!(
                "Failed to load scene from {}: {:#}; using preset '{}'",
                source,
                e,
                presets::DEFAULT_PRESET
            );
            let scene = presets::simulator();
            let store = scene.build_store().unwrap_or_default();
            (scene, store)
        }
    }
}

/// Resolve `arg` the way the plugin does and write the validated scene to `path`.
pub fn export_scene(arg: Option<&str>, path: &Path) -> Result<SceneSource> {
    let source = loader::resolve_source(arg, loader::config_dir().as_deref());
    let scene = loader::load(&source)?;
    loader::write_scene_file(path, &scene)?;
    Ok(source)
}

fn set_window_title(scene: Res<ActiveScene>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in &mut windows {
        window.title = scene.0.title.clone();
    }
}
