//! Scene source resolution and JSON scene files
//!
//! Lookup order:
//! 1. the command-line argument, either a preset name or a path to a JSON scene
//! 2. `scene.json` in the platform config directory:
//!    - macOS: ~/Library/Application Support/solarsim/
//!    - Linux: ~/.config/solarsim/
//!    - Windows: %APPDATA%\solarsim\config\
//! 3. the default preset

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scene::presets;
use crate::scene::types::SceneDescription;

pub const SCENE_FILE_NAME: &str = "scene.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneSource {
    Preset(String),
    File(PathBuf),
}

impl std::fmt::Display for SceneSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSource::Preset(name) => write!(f, "preset '{}'", name),
            SceneSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Platform config directory for user scenes, if one can be resolved.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "solarsim").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Pick a scene source from an optional argument and an optional config directory.
pub fn resolve_source(arg: Option<&str>, config_dir: Option<&Path>) -> SceneSource {
    if let Some(arg) = arg.map(str::trim).filter(|a| !a.is_empty()) {
        if presets::by_name(arg).is_some() {
            return SceneSource::Preset(arg.to_ascii_lowercase());
        }
        return SceneSource::File(PathBuf::from(arg));
    }

    if let Some(dir) = config_dir {
        let candidate = dir.join(SCENE_FILE_NAME);
        if candidate.is_file() {
            return SceneSource::File(candidate);
        }
    }

    SceneSource::Preset(presets::DEFAULT_PRESET.to_string())
}

/// Load, validate and order a scene.
pub fn load(source: &SceneSource) -> Result<SceneDescription> {
    let scene = match source {
        SceneSource::Preset(name) => presets::by_name(name).with_context(|| {
            format!(
                "unknown preset '{}' (available: {})",
                name,
                presets::names().join(", ")
            )
        })?,
        SceneSource::File(path) => read_scene_file(path)?,
    };
    scene
        .into_ordered()
        .with_context(|| format!("invalid scene from {}", source))
}

pub fn read_scene_file(path: &Path) -> Result<SceneDescription> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file {}", path.display()))?;
    let scene = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse scene file {}", path.display()))?;
    Ok(scene)
}

pub fn write_scene_file(path: &Path, scene: &SceneDescription) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let contents = serde_json::to_string_pretty(scene)?;
    fs::write(path, contents)
        .with_context(|| format!("failed to write scene file {}", path.display()))?;
    Ok(())
}
