//! Body tree resolved parent-before-child each frame.

use anyhow::{Result, bail};
use bevy::prelude::*;

use crate::orbital::kinematics::OrbitingBody;

/// One tracked body and its place in the tree.
#[derive(Debug)]
pub struct BodyEntry {
    pub body: OrbitingBody,
    /// Index of the parent entry; always lower than this entry's own index.
    pub parent: Option<usize>,
    /// World position resolved during the last update.
    pub world_position: Vec3,
}

impl BodyEntry {
    /// Where this body's orbital plane is anchored (its focus in world space).
    pub fn focus(&self, store: &BodyStore) -> Vec3 {
        self.parent
            .and_then(|p| store.items.get(p))
            .map(|p| p.world_position)
            .unwrap_or(Vec3::ZERO)
    }
}

/// All orbiting bodies of the scene, stored so that every parent precedes its children.
#[derive(Resource, Default, Debug)]
pub struct BodyStore {
    pub items: Vec<BodyEntry>,
}

impl BodyStore {
    /// Append a body. The parent, if any, must already be in the store.
    pub fn insert(&mut self, body: OrbitingBody, parent: Option<usize>) -> Result<usize> {
        if let Some(p) = parent
            && p >= self.items.len()
        {
            bail!(
                "body '{}' refers to parent index {} but only {} bodies precede it",
                body.name,
                p,
                self.items.len()
            );
        }
        let index = self.items.len();
        self.items.push(BodyEntry {
            body,
            parent,
            world_position: Vec3::ZERO,
        });
        self.resolve_one(index);
        Ok(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|e| e.body.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&BodyEntry> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Advance every body and re-resolve world positions top-down.
    pub fn advance(&mut self, dt: f32, time_scale: f32) {
        for index in 0..self.items.len() {
            self.items[index].body.step(dt, time_scale);
            self.resolve_one(index);
        }
    }

    fn resolve_one(&mut self, index: usize) {
        let origin = self.items[index]
            .parent
            .map(|p| self.items[p].world_position)
            .unwrap_or(Vec3::ZERO);
        let entry = &mut self.items[index];
        entry.world_position = entry.body.world_position(origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::kinematics::OrbitShape;

    fn planet(name: &str, radius: f32, period: f32) -> OrbitingBody {
        OrbitingBody::new(name, OrbitShape::new(radius, 0.0), period, 1.0)
    }

    #[test]
    fn test_child_follows_parent() {
        let mut store = BodyStore::default();
        let earth = store.insert(planet("earth", 8.0, 14.0), None).unwrap();
        let moon = store.insert(planet("moon", 0.9, 2.2), Some(earth)).unwrap();

        for _ in 0..240 {
            store.advance(1.0 / 60.0, 2.0);
            let earth_pos = store.items[earth].world_position;
            let moon_pos = store.items[moon].world_position;
            let offset = moon_pos - earth_pos;
            assert!((offset.length() - 0.9).abs() < 1e-3, "offset {}", offset.length());
            assert!((earth_pos.length() - 8.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rejects_forward_parent() {
        let mut store = BodyStore::default();
        let err = store.insert(planet("moon", 1.0, 1.0), Some(0)).unwrap_err();
        assert!(err.to_string().contains("parent index 0"));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_ring_tracks_parent_without_motion() {
        let mut store = BodyStore::default();
        let saturn = store.insert(planet("saturn", 60.0, 30.0), None).unwrap();
        let ring = OrbitingBody::stationary("ring", OrbitShape::new(0.0, 0.0), 0.0);
        let ring = store.insert(ring, Some(saturn)).unwrap();

        store.advance(3.0, 1.0);
        assert_eq!(store.items[ring].world_position, store.items[saturn].world_position);
        assert_eq!(store.items[ring].body.theta, 0.0);
    }

    #[test]
    fn test_zero_scale_keeps_positions() {
        let mut store = BodyStore::default();
        let sun_child = store.insert(planet("mercury", 4.0, 6.0), None).unwrap();
        store.advance(0.5, 1.0);
        let before = store.items[sun_child].world_position;
        store.advance(0.5, 0.0);
        assert_eq!(store.items[sun_child].world_position, before);
    }

    #[test]
    fn test_focus_and_lookup() {
        let mut store = BodyStore::default();
        let earth = store.insert(planet("earth", 8.0, 14.0), None).unwrap();
        let moon = store.insert(planet("moon", 0.9, 2.2), Some(earth)).unwrap();
        store.advance(1.0, 1.0);
        assert_eq!(store.index_of("moon"), Some(moon));
        assert_eq!(store.index_of("pluto"), None);
        let focus = store.items[moon].focus(&store);
        assert_eq!(focus, store.items[earth].world_position);
        assert_eq!(store.items[earth].focus(&store), Vec3::ZERO);
    }
}
