//! Orbit polyline generation

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::orbital::kinematics::OrbitShape;

/// Segment count for circular orbit lines.
pub const CIRCLE_SEGMENTS: u32 = 180;
/// Segment count for elliptical orbit lines.
pub const ELLIPSE_SEGMENTS: u32 = 260;

/// Closed polyline approximating an orbit in its own (untilted) plane.
#[derive(Clone, Debug, Default)]
pub struct OrbitPath {
    pub points: Vec<Vec3>,
}

impl OrbitPath {
    /// Sample `segments + 1` evenly spaced angles over `[0, 2π]`, so the last
    /// point coincides with the first and the strip closes.
    pub fn generate(shape: &OrbitShape, segments: u32) -> Self {
        let segments = segments.max(3);
        let points = (0..=segments)
            .map(|i| {
                let t = i as f32 / segments as f32 * TAU;
                let r = shape.radius_at(t);
                Vec3::new(t.cos() * r, 0.0, t.sin() * r)
            })
            .collect();
        Self { points }
    }

    /// Default resolution for a shape.
    pub fn for_shape(shape: &OrbitShape) -> Self {
        let segments = match shape {
            OrbitShape::Circular { .. } => CIRCLE_SEGMENTS,
            OrbitShape::Elliptical { .. } => ELLIPSE_SEGMENTS,
        };
        Self::generate(shape, segments)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
