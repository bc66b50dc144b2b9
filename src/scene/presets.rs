//! Built-in scenes

use crate::comet::{PuffConfig, TailConfig};
use crate::orbital::PhaseMode;
use crate::scene::types::{
    BodyDescription, ControlScheme, SceneDescription, SunDescription, TailDescription,
};

pub const SIMULATOR: &str = "simulator";
pub const CLASSIC: &str = "classic";
pub const DEFAULT_PRESET: &str = SIMULATOR;

/// Frame rate the classic scene's per-frame angular speeds were tuned for.
const CLASSIC_FRAME_RATE: f32 = 60.0;

const ORANGE: [u8; 3] = [255, 128, 0];
const AZURE: [u8; 3] = [0, 128, 255];
const RED: [u8; 3] = [255, 0, 0];
const CYAN: [u8; 3] = [0, 255, 255];
const BLUE: [u8; 3] = [0, 0, 255];
const YELLOW: [u8; 3] = [255, 255, 0];
const GRAY: [u8; 3] = [128, 128, 128];
const LIGHT_GRAY: [u8; 3] = [192, 192, 192];

pub fn names() -> [&'static str; 2] {
    [SIMULATOR, CLASSIC]
}

pub fn by_name(name: &str) -> Option<SceneDescription> {
    match name.to_ascii_lowercase().as_str() {
        SIMULATOR => Some(simulator()),
        CLASSIC => Some(classic()),
        _ => None,
    }
}

/// Period in seconds for an angular speed given in degrees per frame.
/// A zero speed means the body does not orbit.
pub fn classic_period(deg_per_frame: f32) -> Option<f32> {
    if deg_per_frame == 0.0 {
        None
    } else {
        Some(360.0 / (deg_per_frame.abs() * CLASSIC_FRAME_RATE))
    }
}

/// Planets with real periods and spin, a moon, and an eccentric comet with a
/// distance-gated tail.
pub fn simulator() -> SceneDescription {
    let planet = |name: &str, r: f32, period: f32, size: f32, color: [u8; 3], tex: &str| {
        BodyDescription::new(name, r, period, size, color)
            .textured(&format!("textures/{}.jpg", tex))
            .with_orbit_color([255, 255, 255, 70])
    };

    let bodies = vec![
        planet("Mercury", 4.0, 6.0, 0.25, ORANGE, "mercury").tilted(3.0).spinning(80.0),
        planet("Venus", 6.0, 10.0, 0.35, [255, 220, 180], "venus").tilted(2.0).spinning(50.0),
        planet("Earth", 8.0, 14.0, 0.38, AZURE, "earth").spinning(90.0),
        planet("Mars", 10.0, 18.0, 0.30, RED, "mars").tilted(1.0).spinning(70.0),
        planet("Jupiter", 14.0, 30.0, 0.90, [220, 180, 140], "jupiter").tilted(1.0).spinning(60.0),
        planet("Saturn", 18.0, 42.0, 0.80, [240, 220, 170], "saturn").tilted(2.0).spinning(55.0),
        planet("Uranus", 22.0, 54.0, 0.65, CYAN, "uranus").tilted(4.0).spinning(45.0),
        planet("Neptune", 26.0, 66.0, 0.62, BLUE, "neptune").tilted(3.0).spinning(45.0),
        planet("Moon", 0.9, 2.2, 0.12, LIGHT_GRAY, "moon")
            .orbiting("Earth")
            .tilted(10.0),
        BodyDescription::new("Comet", 16.0, 38.0, 0.18, LIGHT_GRAY)
            .eccentric(0.65)
            .textured("textures/comet.jpg")
            .tilted(25.0)
            .spinning(20.0)
            .with_orbit_color([200, 220, 255, 90])
            .with_tail(TailDescription::Decaying(TailConfig::default())),
    ];

    SceneDescription {
        title: "Solar System Simulator".to_string(),
        controls: ControlScheme::Simulator,
        time_scale: 1.0,
        sun: SunDescription {
            size: 3.2,
            color: YELLOW,
            texture: Some("textures/sun.jpg".to_string()),
            light_range: 200.0,
        },
        bodies,
    }
}

/// Tilted planetary orbits with rings and moons, and a comet whose phase
/// offset skews its path, trailing short-lived puffs.
pub fn classic() -> SceneDescription {
    // Sizes and radii follow the classic layout: diameter / 5, orbit radius / 10.
    let body = |name: &str, diameter: f32, orbit: f32, deg_per_frame: f32, color: [u8; 3]| {
        let mut desc = BodyDescription::new(name, orbit / 10.0, 0.0, diameter / 5.0, color);
        desc.period = classic_period(deg_per_frame);
        desc
    };

    let bodies = vec![
        body("Mercury", 1.2, 50.0, 1.0, GRAY).tilted(7.0),
        body("Venus", 1.45, 80.0, 1.5, ORANGE).tilted(3.4),
        body("Earth", 2.0, 170.0, 0.7, BLUE),
        body("Mars", 1.55, 230.0, 0.5, RED).tilted(1.8),
        body("Jupiter", 10.0, 400.0, 0.3, [200, 150, 100]).tilted(1.3),
        body("Saturn", 8.2, 600.0, 0.2, [196, 176, 139]).tilted(2.5),
        BodyDescription::ring("Saturn Ring", "Saturn", 1.0, 1.7, [196, 176, 139]),
        body("Uranus", 3.7, 690.0, 0.15, CYAN).tilted(0.8),
        BodyDescription::ring("Uranus Ring", "Uranus", 0.45, 0.8, GRAY),
        body("Neptune", 3.57, 750.0, 0.1, [65, 105, 225]).tilted(1.8),
        body("Halley", 1.0, 800.0, 0.07, [220, 220, 230])
            .tilted(18.0)
            .phased(50.0, PhaseMode::SkewedX)
            .with_orbit_segments(360)
            .with_tail(TailDescription::Puffs(PuffConfig::default())),
        body("Moon", 1.0, 15.0, 3.0, LIGHT_GRAY).orbiting("Earth"),
        body("Io", 1.25, 18.0, 1.55, YELLOW).orbiting("Jupiter"),
        body("Titan", 1.2, 22.0, 1.1, ORANGE).orbiting("Saturn"),
    ];

    SceneDescription {
        title: "Solar System 3D - Comet Tilt & Orbits".to_string(),
        controls: ControlScheme::Classic,
        time_scale: 1.0,
        sun: SunDescription {
            size: 5.0,
            color: YELLOW,
            texture: None,
            light_range: 100.0,
        },
        bodies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::types::BodyKind;

    #[test]
    fn test_presets_are_valid() {
        for name in names() {
            let scene = by_name(name).unwrap().into_ordered().unwrap();
            let store = scene.build_store().unwrap();
            assert_eq!(store.len(), scene.bodies.len(), "{}", name);
        }
        assert!(by_name("Classic").is_some());
        assert!(by_name("pluto").is_none());
    }

    #[test]
    fn test_classic_period_conversion() {
        assert_eq!(classic_period(0.0), None);
        assert_eq!(classic_period(1.0), Some(6.0));
        assert_eq!(classic_period(3.0), Some(2.0));
    }

    #[test]
    fn test_simulator_comet_matches_reference_orbit() {
        let scene = simulator();
        let comet = scene.bodies.iter().find(|b| b.name == "Comet").unwrap();
        let shape = comet.shape();
        assert!((shape.radius_at(0.0) - 5.6).abs() < 1e-3);
        assert!((shape.radius_at(std::f32::consts::PI) - 26.4).abs() < 1e-3);
        assert!(matches!(comet.tail, Some(TailDescription::Decaying(_))));
    }

    #[test]
    fn test_classic_rings_and_moons() {
        let scene = classic().into_ordered().unwrap();
        let rings: Vec<_> = scene
            .bodies
            .iter()
            .filter(|b| matches!(b.kind, BodyKind::Ring { .. }))
            .collect();
        assert_eq!(rings.len(), 2);
        let store = scene.build_store().unwrap();
        let titan = store.index_of("Titan").unwrap();
        let saturn = store.index_of("Saturn").unwrap();
        assert_eq!(store.items[titan].parent, Some(saturn));
    }
}
