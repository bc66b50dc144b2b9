//! Distance-gated comet tail.
//!
//! Markers are kept most-recent-first in a bounded queue. They are emitted
//! while the comet is close to the focus and drained a few at a time once it
//! moves beyond the cut-off distance.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::comet::host::{MarkerKind, VisualHost};

/// Tail tuning. Distances are fractions of the semi-major axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    pub capacity: usize,
    /// Minimum distance the comet must travel between two markers.
    pub min_step: f32,
    /// Markers evicted per update once the strength reaches zero.
    pub decay_batch: usize,
    /// Full strength at or inside `fade_start · a`.
    pub fade_start: f32,
    /// Zero strength at or beyond `fade_end · a`.
    pub fade_end: f32,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            capacity: 60,
            min_step: 0.35,
            decay_batch: 3,
            fade_start: 0.95,
            fade_end: 1.9,
        }
    }
}

/// Visual intensity of the tail in `[0, 1]` for a comet at distance `r`.
pub fn tail_strength(r: f32, semi_major_axis: f32, config: &TailConfig) -> f32 {
    let start = semi_major_axis * config.fade_start;
    let end = semi_major_axis * config.fade_end;
    let span = end - start;
    if span <= f32::EPSILON {
        return if r <= start { 1.0 } else { 0.0 };
    }
    1.0 - ((r - start) / span).clamp(0.0, 1.0)
}

pub fn marker_scale(strength: f32) -> f32 {
    0.04 + 0.07 * strength
}

pub fn marker_color(strength: f32) -> Color {
    Color::srgba_u8(200, 220, 255, (20.0 + 120.0 * strength) as u8)
}

/// One emitted marker. Its scale and colour are fixed by the strength at
/// emission and live on the host object.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailMarker<H> {
    pub world_position: Vec3,
    pub handle: H,
}

/// Bounded queue of tail markers owned by one comet.
#[derive(Debug)]
pub struct CometTail<H> {
    pub config: TailConfig,
    /// Newest first.
    markers: VecDeque<TrailMarker<H>>,
    enabled: bool,
}

impl<H: Copy + PartialEq + std::fmt::Debug> CometTail<H> {
    pub fn new(config: TailConfig, enabled: bool) -> Self {
        Self {
            config,
            markers: VecDeque::with_capacity(config.capacity + 1),
            enabled,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Feed the comet's current state. Returns `true` when markers were added or removed.
    pub fn update<V>(
        &mut self,
        host: &mut V,
        world_position: Vec3,
        distance_from_focus: f32,
        semi_major_axis: f32,
    ) -> bool
    where
        V: VisualHost<Handle = H>,
    {
        if !self.enabled {
            return false;
        }

        let strength = tail_strength(distance_from_focus, semi_major_axis, &self.config);
        if strength > 0.0 {
            self.push(host, world_position, strength)
        } else {
            self.decay(host, self.config.decay_batch) > 0
        }
    }

    /// Switch the tail on or off. Turning it off drops every marker, so the
    /// first update after re-enabling emits at once.
    pub fn set_enabled<V>(&mut self, enabled: bool, host: &mut V) -> bool
    where
        V: VisualHost<Handle = H>,
    {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        if !enabled {
            self.clear(host);
        }
        true
    }

    pub fn clear<V>(&mut self, host: &mut V)
    where
        V: VisualHost<Handle = H>,
    {
        for marker in self.markers.drain(..) {
            host.destroy(marker.handle);
        }
    }

    fn push<V>(&mut self, host: &mut V, world_position: Vec3, strength: f32) -> bool
    where
        V: VisualHost<Handle = H>,
    {
        // Step is measured from the newest marker still alive.
        if let Some(newest) = self.markers.front()
            && newest.world_position.distance(world_position) < self.config.min_step
        {
            return false;
        }

        let visual_scale = marker_scale(strength);
        let handle = host.create(
            MarkerKind::TailDot,
            Transform::from_translation(world_position).with_scale(Vec3::splat(visual_scale)),
            marker_color(strength),
        );
        self.markers.push_front(TrailMarker {
            world_position,
            handle,
        });

        while self.markers.len() > self.config.capacity {
            if let Some(oldest) = self.markers.pop_back() {
                host.destroy(oldest.handle);
            }
        }
        true
    }

    fn decay<V>(&mut self, host: &mut V, count: usize) -> usize
    where
        V: VisualHost<Handle = H>,
    {
        let mut removed = 0;
        for _ in 0..count {
            let Some(oldest) = self.markers.pop_back() else {
                break;
            };
            host.destroy(oldest.handle);
            removed += 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comet::host::testing::RecordingHost;
    use bevy::color::Alpha;

    const A: f32 = 16.0;

    fn tail() -> CometTail<u32> {
        CometTail::new(TailConfig::default(), true)
    }

    /// Walk along x in steps larger than the minimum step.
    fn walk(tail: &mut CometTail<u32>, host: &mut RecordingHost, steps: usize, r: f32) {
        for i in 0..steps {
            tail.update(host, Vec3::new(i as f32, 0.0, 0.0), r, A);
        }
    }

    #[test]
    fn test_strength_ramp() {
        let cfg = TailConfig::default();
        assert_eq!(tail_strength(5.6, A, &cfg), 1.0);
        assert_eq!(tail_strength(A * 0.95, A, &cfg), 1.0);
        assert_eq!(tail_strength(A * 1.9, A, &cfg), 0.0);
        assert_eq!(tail_strength(26.4, A, &cfg), 0.0);
        let mid = A * (0.95 + 1.9) / 2.0;
        assert!((tail_strength(mid, A, &cfg) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_strength_degenerate_axis() {
        let cfg = TailConfig::default();
        assert_eq!(tail_strength(0.0, 0.0, &cfg), 1.0);
        assert_eq!(tail_strength(1.0, 0.0, &cfg), 0.0);
    }

    #[test]
    fn test_capacity_bound() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        walk(&mut tail, &mut host, 200, 5.6);
        assert_eq!(tail.len(), 60);
        assert_eq!(host.alive.len(), 60);
        assert_eq!(host.destroyed, 140);
        let newest = tail.markers.iter().next().unwrap();
        assert_eq!(newest.world_position.x, 199.0);
    }

    #[test]
    fn test_min_step_suppresses_flooding() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        assert!(tail.update(&mut host, Vec3::ZERO, 5.6, A));
        assert!(!tail.update(&mut host, Vec3::new(0.2, 0.0, 0.0), 5.6, A));
        assert!(tail.update(&mut host, Vec3::new(0.4, 0.0, 0.0), 5.6, A));
        assert_eq!(tail.len(), 2);
    }

    #[test]
    fn test_drains_within_twenty_updates() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        walk(&mut tail, &mut host, 100, 5.6);
        assert_eq!(tail.len(), 60);

        for i in 0..20 {
            assert!(tail.update(&mut host, Vec3::ZERO, 26.4, A), "update {}", i);
        }
        assert_eq!(tail.len(), 0);
        assert!(host.alive.is_empty());
        assert!(!tail.update(&mut host, Vec3::ZERO, 26.4, A));
    }

    #[test]
    fn test_decay_removes_oldest_first() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        walk(&mut tail, &mut host, 5, 5.6);
        tail.update(&mut host, Vec3::ZERO, 30.0, A);
        let remaining: Vec<f32> = tail.markers.iter().map(|m| m.world_position.x).collect();
        assert_eq!(remaining, vec![4.0, 3.0]);
    }

    #[test]
    fn test_toggle_resets_history() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        walk(&mut tail, &mut host, 10, 5.6);
        let last = Vec3::new(9.0, 0.0, 0.0);

        assert!(tail.set_enabled(false, &mut host));
        assert_eq!(tail.len(), 0);
        assert!(host.alive.is_empty());
        assert!(!tail.update(&mut host, last, 5.6, A));

        assert!(tail.set_enabled(true, &mut host));
        assert!(!tail.set_enabled(true, &mut host));
        // Same spot as the last marker before the toggle; the step rule no longer applies.
        assert!(tail.update(&mut host, last, 5.6, A));
        assert_eq!(tail.len(), 1);
        assert_eq!(host.alive.len(), 1);
    }

    #[test]
    fn test_marker_appearance_follows_strength() {
        let mut host = RecordingHost::default();
        let mut tail = tail();
        tail.update(&mut host, Vec3::ZERO, 5.6, A);
        let marker = tail.markers.iter().next().unwrap();
        let (kind, transform, color) = host.alive[&marker.handle];
        assert_eq!(kind, MarkerKind::TailDot);
        assert!((transform.scale.x - 0.11).abs() < 1e-6);
        assert!((color.alpha() - 140.0 / 255.0).abs() < 1e-3);

        // Halfway through the fade the marker is smaller and dimmer.
        let mid = A * (0.95 + 1.9) / 2.0;
        tail.update(&mut host, Vec3::new(1.0, 0.0, 0.0), mid, A);
        let marker = tail.markers.iter().next().unwrap();
        let (_, transform, color) = host.alive[&marker.handle];
        assert!((transform.scale.x - 0.075).abs() < 1e-4);
        assert!((color.alpha() - 80.0 / 255.0).abs() < 1e-2);
    }
}
