//! Capability interface for short-lived visual markers.
//!
//! Trail managers only decide *when* markers appear, move and disappear. The
//! host turns those decisions into engine objects.

use bevy::prelude::*;

/// What a marker represents; hosts may pick a different mesh per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    /// Debris dot of the distance-gated comet tail.
    TailDot,
    /// Short-lived shrinking puff of the classic trail.
    Puff,
}

pub trait VisualHost {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    fn create(&mut self, kind: MarkerKind, transform: Transform, color: Color) -> Self::Handle;
    fn update(&mut self, handle: Self::Handle, transform: Transform);
    fn destroy(&mut self, handle: Self::Handle);
}
