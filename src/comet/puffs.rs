//! Time-driven puff trail: a new puff every frame, each shrinking and
//! disappearing after a fixed lifetime.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::comet::host::{MarkerKind, VisualHost};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuffConfig {
    /// Seconds between two puffs. Tiny values mean "once per update".
    pub emit_interval: f32,
    /// Puffs are destroyed once their age reaches this many seconds.
    pub lifetime: f32,
    /// Seconds to go from the initial scale to `end_scale`.
    pub shrink_duration: f32,
    pub end_scale: f32,
    /// Initial scale relative to the comet's visual size.
    pub size_factor: f32,
}

impl Default for PuffConfig {
    fn default() -> Self {
        Self {
            emit_interval: 5.0e-6,
            lifetime: 0.1,
            shrink_duration: 0.05,
            end_scale: 0.5,
            size_factor: 0.7,
        }
    }
}

pub fn puff_color() -> Color {
    Color::srgba_u8(200, 200, 255, 100)
}

#[derive(Debug)]
struct Puff<H> {
    handle: H,
    position: Vec3,
    start_scale: f32,
    age: f32,
}

#[derive(Debug)]
pub struct PuffTrail<H> {
    pub config: PuffConfig,
    puffs: Vec<Puff<H>>,
    timer: f32,
    enabled: bool,
}

impl<H: Copy + PartialEq + std::fmt::Debug> PuffTrail<H> {
    pub fn new(config: PuffConfig, enabled: bool) -> Self {
        Self {
            config,
            puffs: Vec::new(),
            timer: 0.0,
            enabled,
        }
    }

    pub fn len(&self) -> usize {
        self.puffs.len()
    }

    /// Scale of a puff of the given age.
    pub fn scale_at(&self, start_scale: f32, age: f32) -> f32 {
        let t = if self.config.shrink_duration > 0.0 {
            (age / self.config.shrink_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        start_scale + (self.config.end_scale - start_scale) * t
    }

    /// Age existing puffs by `dt` and emit a new one at `world_position` when due.
    pub fn update<V>(&mut self, host: &mut V, dt: f32, world_position: Vec3, body_size: f32) -> bool
    where
        V: VisualHost<Handle = H>,
    {
        if !self.enabled {
            return false;
        }
        let mut changed = false;

        let lifetime = self.config.lifetime;
        let mut kept = Vec::with_capacity(self.puffs.len() + 1);
        for mut puff in self.puffs.drain(..) {
            puff.age += dt;
            if puff.age >= lifetime {
                host.destroy(puff.handle);
                changed = true;
            } else {
                kept.push(puff);
            }
        }
        for puff in &kept {
            let scale = self.scale_at(puff.start_scale, puff.age);
            host.update(
                puff.handle,
                Transform::from_translation(puff.position).with_scale(Vec3::splat(scale)),
            );
        }
        self.puffs = kept;

        self.timer += dt;
        if self.timer > self.config.emit_interval {
            self.timer = 0.0;
            let start_scale = body_size * self.config.size_factor;
            let handle = host.create(
                MarkerKind::Puff,
                Transform::from_translation(world_position).with_scale(Vec3::splat(start_scale)),
                puff_color(),
            );
            self.puffs.push(Puff {
                handle,
                position: world_position,
                start_scale,
                age: 0.0,
            });
            changed = true;
        }
        changed
    }

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
        for puff in self.puffs.drain(..) {
            host.destroy(puff.handle);
        }
        self.timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comet::host::testing::RecordingHost;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_one_puff_per_frame_with_bounded_lifetime() {
        let mut host = RecordingHost::default();
        let mut trail = PuffTrail::new(PuffConfig::default(), true);
        for i in 0..120 {
            trail.update(&mut host, FRAME, Vec3::new(i as f32, 0.0, 0.0), 0.2);
        }
        assert_eq!(host.created, 120);
        // 0.1 s lifetime at 60 Hz keeps about six puffs alive.
        assert!(trail.len() <= 7, "{} puffs alive", trail.len());
        assert_eq!(host.alive.len(), trail.len());
    }

    #[test]
    fn test_puffs_expire_without_new_emission() {
        let mut host = RecordingHost::default();
        let mut trail = PuffTrail::new(PuffConfig::default(), true);
        trail.update(&mut host, FRAME, Vec3::ZERO, 0.2);
        assert_eq!(trail.len(), 1);

        trail.config.emit_interval = f32::MAX;
        trail.update(&mut host, 0.2, Vec3::ZERO, 0.2);
        assert_eq!(trail.len(), 0);
        assert!(host.alive.is_empty());
    }

    #[test]
    fn test_scale_interpolates_toward_end() {
        let trail: PuffTrail<u32> = PuffTrail::new(PuffConfig::default(), true);
        assert_eq!(trail.scale_at(0.14, 0.0), 0.14);
        assert!((trail.scale_at(0.14, 0.025) - 0.32).abs() < 1e-5);
        assert!((trail.scale_at(0.14, 0.08) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_disable_clears_puffs() {
        let mut host = RecordingHost::default();
        let mut trail = PuffTrail::new(PuffConfig::default(), true);
        for _ in 0..3 {
            trail.update(&mut host, FRAME, Vec3::ZERO, 0.2);
        }
        assert!(trail.set_enabled(false, &mut host));
        assert_eq!(trail.len(), 0);
        assert!(host.alive.is_empty());
        assert!(!trail.update(&mut host, FRAME, Vec3::ZERO, 0.2));
        assert_eq!(host.created, 3);
    }
}
