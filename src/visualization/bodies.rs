//! Body meshes, materials and per-frame transform sync

use bevy::color::Alpha;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use crate::orbital::BodyStore;

/// Links a sphere entity to its entry in the body store.
#[derive(Component, Copy, Clone, Debug)]
pub struct OrbitalBody {
    pub index: usize,
}

/// Flat annulus that sits on its parent body.
#[derive(Component, Copy, Clone, Debug)]
pub struct RingMesh {
    pub index: usize,
}

/// Directory Bevy resolves `assets/` against.
pub fn asset_root() -> PathBuf {
    if let Ok(root) = std::env::var("BEVY_ASSET_ROOT") {
        return PathBuf::from(root);
    }
    if let Ok(root) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(root);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn asset_exists(root: &Path, relative: &str) -> bool {
    root.join("assets").join(relative).is_file()
}

/// Load a texture only when the file is present; missing files fall back to
/// the flat body colour.
pub fn load_texture(asset_server: &AssetServer, path: Option<&str>) -> Option<Handle<Image>> {
    let path = path?;
    if asset_exists(&asset_root(), path) {
        Some(asset_server.load(path.to_string()))
    } else {
        debug!("Texture {} not found, using flat colour", path);
        None
    }
}

pub fn body_material(color: Color, texture: Option<Handle<Image>>) -> StandardMaterial {
    match texture {
        Some(texture) => StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: Some(texture),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        },
        None => StandardMaterial {
            base_color: color,
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        },
    }
}

pub fn ring_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(0.8),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 1.0,
        ..default()
    }
}

/// Annulus meshes are built in the XY plane; this lays them flat in XZ.
pub fn ring_base_rotation() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Copy resolved positions and spin into sphere and ring transforms.
pub fn sync_body_transforms_system(
    store: Res<BodyStore>,
    mut bodies: Query<(&OrbitalBody, &mut Transform), Without<RingMesh>>,
    mut rings: Query<(&RingMesh, &mut Transform), Without<OrbitalBody>>,
) {
    if !store.is_changed() {
        return;
    }

    for (body, mut transform) in &mut bodies {
        if let Some(entry) = store.get(body.index) {
            transform.translation = entry.world_position;
            transform.rotation = entry.body.spin_rotation();
        }
    }

    for (ring, mut transform) in &mut rings {
        if let Some(entry) = store.get(ring.index) {
            transform.translation = entry.world_position;
        }
    }
}
