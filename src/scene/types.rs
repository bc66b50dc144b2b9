//! Serializable scene descriptions

use anyhow::{Result, bail};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::comet::{PuffConfig, TailConfig};
use crate::orbital::{BodyStore, OrbitPath, OrbitShape, OrbitingBody, PhaseMode};

/// Which key bindings and overlay a scene uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Held arrow keys nudge the time scale, `F` toggles orbits.
    Classic,
    /// Number keys pick a time scale; pause, orbit, tail and help toggles.
    #[default]
    Simulator,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyKind {
    #[default]
    Sphere,
    /// Flat annulus that sits on its parent and never orbits.
    Ring { inner: f32, outer: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum TailDescription {
    Decaying(TailConfig),
    Puffs(PuffConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunDescription {
    pub size: f32,
    pub color: [u8; 3],
    #[serde(default)]
    pub texture: Option<String>,
    /// Range of the point light placed at the sun.
    pub light_range: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub kind: BodyKind,
    /// Circle radius, or semi-major axis for eccentric orbits.
    pub orbit_radius: f32,
    #[serde(default)]
    pub eccentricity: f32,
    /// Orbital period in simulated seconds. `None` keeps the body still.
    #[serde(default)]
    pub period: Option<f32>,
    pub size: f32,
    pub color: [u8; 3],
    #[serde(default)]
    pub texture: Option<String>,
    /// Orbit line colour; defaults to the body colour at low alpha.
    #[serde(default)]
    pub orbit_color: Option<[u8; 4]>,
    #[serde(default)]
    pub tilt_deg: f32,
    #[serde(default)]
    pub spin_deg_per_sec: f32,
    #[serde(default)]
    pub phase_deg: f32,
    #[serde(default)]
    pub phase_mode: PhaseMode,
    #[serde(default)]
    pub tail: Option<TailDescription>,
    /// Orbit line resolution; defaults by shape.
    #[serde(default)]
    pub orbit_segments: Option<u32>,
}

impl BodyDescription {
    pub fn new(name: &str, orbit_radius: f32, period: f32, size: f32, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            kind: BodyKind::Sphere,
            orbit_radius,
            eccentricity: 0.0,
            period: Some(period),
            size,
            color,
            texture: None,
            orbit_color: None,
            tilt_deg: 0.0,
            spin_deg_per_sec: 0.0,
            phase_deg: 0.0,
            phase_mode: PhaseMode::Uniform,
            tail: None,
            orbit_segments: None,
        }
    }

    pub fn ring(name: &str, parent: &str, inner: f32, outer: f32, color: [u8; 3]) -> Self {
        Self {
            parent: Some(parent.to_string()),
            kind: BodyKind::Ring { inner, outer },
            period: None,
            ..Self::new(name, 0.0, 0.0, 0.0, color)
        }
    }

    pub fn orbiting(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn eccentric(mut self, eccentricity: f32) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub fn textured(mut self, texture: &str) -> Self {
        self.texture = Some(texture.to_string());
        self
    }

    pub fn tilted(mut self, tilt_deg: f32) -> Self {
        self.tilt_deg = tilt_deg;
        self
    }

    pub fn spinning(mut self, spin_deg_per_sec: f32) -> Self {
        self.spin_deg_per_sec = spin_deg_per_sec;
        self
    }

    pub fn phased(mut self, phase_deg: f32, phase_mode: PhaseMode) -> Self {
        self.phase_deg = phase_deg;
        self.phase_mode = phase_mode;
        self
    }

    pub fn with_orbit_color(mut self, rgba: [u8; 4]) -> Self {
        self.orbit_color = Some(rgba);
        self
    }

    pub fn with_tail(mut self, tail: TailDescription) -> Self {
        self.tail = Some(tail);
        self
    }

    pub fn with_orbit_segments(mut self, segments: u32) -> Self {
        self.orbit_segments = Some(segments);
        self
    }

    pub fn stationary(mut self) -> Self {
        self.period = None;
        self
    }

    pub fn shape(&self) -> OrbitShape {
        OrbitShape::new(self.orbit_radius, self.eccentricity)
    }

    pub fn orbit_path(&self) -> OrbitPath {
        match self.orbit_segments {
            Some(segments) => OrbitPath::generate(&self.shape(), segments),
            None => OrbitPath::for_shape(&self.shape()),
        }
    }

    /// Kinematic model for this description. Rings get zero intrinsic size.
    pub fn to_body(&self) -> OrbitingBody {
        let size = match self.kind {
            BodyKind::Sphere => self.size,
            BodyKind::Ring { .. } => 0.0,
        };
        let body = match self.period {
            Some(period) => OrbitingBody::new(&self.name, self.shape(), period, size),
            None => OrbitingBody::stationary(&self.name, self.shape(), size),
        };
        body.with_tilt(self.tilt_deg)
            .with_spin(self.spin_deg_per_sec)
            .with_phase(self.phase_deg.to_radians(), self.phase_mode)
    }

    pub fn body_color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb_u8(r, g, b)
    }

    pub fn orbit_line_color(&self) -> Color {
        let [r, g, b, a] = self.orbit_color.unwrap_or([
            self.color[0],
            self.color[1],
            self.color[2],
            80,
        ]);
        Color::srgba_u8(r, g, b, a)
    }

    /// Rings and degenerate orbits have nothing to draw.
    pub fn has_orbit_line(&self) -> bool {
        matches!(self.kind, BodyKind::Sphere) && self.orbit_radius > 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub title: String,
    #[serde(default)]
    pub controls: ControlScheme,
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    pub sun: SunDescription,
    pub bodies: Vec<BodyDescription>,
}

fn default_time_scale() -> f32 {
    1.0
}

/// Smallest framing distance reported by `extent`.
pub const MIN_EXTENT: f32 = 1.0;

impl SceneDescription {
    /// Check names, parent references and tail settings.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for body in &self.bodies {
            if body.name.trim().is_empty() {
                bail!("scene '{}' has a body without a name", self.title);
            }
            if !names.insert(body.name.as_str()) {
                bail!("duplicate body name '{}'", body.name);
            }
            if let Some(TailDescription::Decaying(tail)) = &body.tail
                && tail.decay_batch == 0
            {
                bail!("tail of '{}' needs a decay_batch of at least 1", body.name);
            }
        }
        for body in &self.bodies {
            if let Some(parent) = &body.parent {
                if parent == &body.name {
                    bail!("body '{}' cannot orbit itself", body.name);
                }
                if !names.contains(parent.as_str()) {
                    bail!("body '{}' refers to unknown parent '{}'", body.name, parent);
                }
            }
        }
        Ok(())
    }

    /// Reorder bodies so that every parent precedes its children. Relative
    /// order is otherwise preserved.
    pub fn into_ordered(mut self) -> Result<Self> {
        self.validate()?;

        let mut remaining = std::mem::take(&mut self.bodies);
        let mut placed: HashSet<String> = HashSet::new();
        let mut ordered = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let before = remaining.len();
            let mut pending = Vec::with_capacity(remaining.len());
            for body in remaining {
                let ready = body
                    .parent
                    .as_ref()
                    .is_none_or(|parent| placed.contains(parent));
                if ready {
                    placed.insert(body.name.clone());
                    ordered.push(body);
                } else {
                    pending.push(body);
                }
            }
            if pending.len() == before {
                let names: Vec<&str> = pending.iter().map(|b| b.name.as_str()).collect();
                bail!("parent cycle between bodies: {}", names.join(", "));
            }
            remaining = pending;
        }

        self.bodies = ordered;
        Ok(self)
    }

    /// Build the body tree. Bodies must already be ordered parent-first.
    pub fn build_store(&self) -> Result<BodyStore> {
        let mut store = BodyStore::default();
        for body in &self.bodies {
            let parent = match &body.parent {
                Some(name) => match store.index_of(name) {
                    Some(index) => Some(index),
                    None => bail!(
                        "parent '{}' of '{}' must be listed before it",
                        name,
                        body.name
                    ),
                },
                None => None,
            };
            store.insert(body.to_body(), parent)?;
        }
        Ok(store)
    }

    /// Largest distance from the sun any top-level body reaches, never below `MIN_EXTENT`.
    pub fn extent(&self) -> f32 {
        self.bodies
            .iter()
            .filter(|b| b.parent.is_none())
            .map(|b| b.orbit_radius * (1.0 + b.shape().eccentricity()))
            .fold(self.sun.size, f32::max)
            .max(MIN_EXTENT)
    }
}
