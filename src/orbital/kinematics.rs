//! Parametric orbital motion for circular and elliptical bodies.
//!
//! Bodies advance their true anomaly at a constant angular rate derived from
//! the orbital period. For elliptical orbits the radius is recomputed from the
//! polar ellipse equation each step; there is no areal-velocity integration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Smallest accepted orbital period (seconds of simulated time).
pub const MIN_PERIOD: f32 = 1.0e-4;
/// Largest accepted eccentricity. Keeps orbits bounded and away from e → 1.
pub const MAX_ECCENTRICITY: f32 = 0.95;

/// Shape of an orbit around its focus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitShape {
    Circular { radius: f32 },
    Elliptical { semi_major_axis: f32, eccentricity: f32 },
}

impl OrbitShape {
    /// Build a shape from a radius / semi-major axis and an eccentricity.
    /// A zero eccentricity yields a circle; anything else is clamped to the safe range.
    pub fn new(radius: f32, eccentricity: f32) -> Self {
        let e = clamp_eccentricity(eccentricity);
        if e == 0.0 {
            OrbitShape::Circular { radius }
        } else {
            OrbitShape::Elliptical {
                semi_major_axis: radius,
                eccentricity: e,
            }
        }
    }

    /// Distance from the focus at true anomaly `theta` (radians).
    pub fn radius_at(&self, theta: f32) -> f32 {
        match *self {
            OrbitShape::Circular { radius } => radius,
            OrbitShape::Elliptical {
                semi_major_axis,
                eccentricity,
            } => polar_ellipse_radius(semi_major_axis, eccentricity, theta),
        }
    }

    pub fn semi_major_axis(&self) -> f32 {
        match *self {
            OrbitShape::Circular { radius } => radius,
            OrbitShape::Elliptical {
                semi_major_axis, ..
            } => semi_major_axis,
        }
    }

    pub fn eccentricity(&self) -> f32 {
        match *self {
            OrbitShape::Circular { .. } => 0.0,
            OrbitShape::Elliptical { eccentricity, .. } => eccentricity,
        }
    }
}

/// How the initial phase offset enters the position formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// `(r·cos(θ+φ), 0, r·sin(θ+φ))`
    #[default]
    Uniform,
    /// `(r·cos(θ+φ), 0, r·sin θ)`. The offset only skews the x component,
    /// which traces a tilted ellipse rather than the circle of radius `r`.
    SkewedX,
}

/// Polar ellipse equation with the focus at the origin:
/// `r(θ) = a(1 − e²) / (1 + e·cos θ)`.
pub fn polar_ellipse_radius(semi_major_axis: f32, eccentricity: f32, theta: f32) -> f32 {
    let e = clamp_eccentricity(eccentricity);
    semi_major_axis * (1.0 - e * e) / (1.0 + e * theta.cos())
}

pub fn clamp_eccentricity(eccentricity: f32) -> f32 {
    if eccentricity.is_nan() {
        return 0.0;
    }
    eccentricity.clamp(0.0, MAX_ECCENTRICITY)
}

pub fn clamp_period(period: f32) -> f32 {
    if period.is_nan() {
        return MIN_PERIOD;
    }
    period.max(MIN_PERIOD)
}

/// A body moving on a fixed orbit inside a tilted orbital plane.
#[derive(Clone, Debug)]
pub struct OrbitingBody {
    pub name: String,
    pub shape: OrbitShape,
    /// `None` for bodies that do not orbit (rings, stationary markers).
    period: Option<f32>,
    pub visual_size: f32,
    /// Degrees per simulated second.
    pub spin_rate: f32,
    /// True anomaly in radians, excluding the phase offset.
    pub theta: f32,
    /// Accumulated spin angle in degrees.
    pub spin: f32,
    /// Rotation of the orbital plane about the X axis, in degrees.
    pub tilt_deg: f32,
    pub phase_offset: f32,
    pub phase_mode: PhaseMode,
}

impl OrbitingBody {
    pub fn new(name: impl Into<String>, shape: OrbitShape, period: f32, visual_size: f32) -> Self {
        Self {
            name: name.into(),
            shape,
            period: Some(clamp_period(period)),
            visual_size,
            spin_rate: 0.0,
            theta: 0.0,
            spin: 0.0,
            tilt_deg: 0.0,
            phase_offset: 0.0,
            phase_mode: PhaseMode::Uniform,
        }
    }

    /// A body that keeps its initial angle forever.
    pub fn stationary(name: impl Into<String>, shape: OrbitShape, visual_size: f32) -> Self {
        Self {
            period: None,
            ..Self::new(name, shape, MIN_PERIOD, visual_size)
        }
    }

    pub fn with_tilt(mut self, tilt_deg: f32) -> Self {
        self.tilt_deg = tilt_deg;
        self
    }

    pub fn with_spin(mut self, spin_rate: f32) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    pub fn with_phase(mut self, phase_offset: f32, phase_mode: PhaseMode) -> Self {
        self.phase_offset = phase_offset;
        self.phase_mode = phase_mode;
        self
    }

    pub fn period(&self) -> Option<f32> {
        self.period
    }

    /// Angular velocity in radians per simulated second.
    pub fn angular_velocity(&self) -> f32 {
        match self.period {
            Some(period) => TAU / period,
            None => 0.0,
        }
    }

    /// Advance by `dt` real seconds scaled by `time_scale`.
    ///
    /// Both angles are kept in one revolution so per-frame increments stay
    /// representable in f32 however long the simulation runs.
    pub fn step(&mut self, dt: f32, time_scale: f32) {
        let scaled = dt * time_scale;
        self.theta = (self.theta + self.angular_velocity() * scaled).rem_euclid(TAU);
        self.spin = (self.spin + self.spin_rate * scaled).rem_euclid(360.0);
    }

    /// Current distance from the focus.
    pub fn radius(&self) -> f32 {
        self.shape.radius_at(self.theta + self.phase_offset)
    }

    /// Position inside the (untilted) orbital plane, relative to the focus.
    pub fn local_position(&self) -> Vec3 {
        let angle = self.theta + self.phase_offset;
        let r = self.shape.radius_at(angle);
        match self.phase_mode {
            PhaseMode::Uniform => Vec3::new(r * angle.cos(), 0.0, r * angle.sin()),
            PhaseMode::SkewedX => Vec3::new(r * angle.cos(), 0.0, r * self.theta.sin()),
        }
    }

    pub fn plane_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.tilt_deg.to_radians())
    }

    /// Position relative to `origin` once the plane tilt is applied.
    pub fn world_position(&self, origin: Vec3) -> Vec3 {
        origin + self.plane_rotation() * self.local_position()
    }

    pub fn spin_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin.to_radians())
    }
}
