//! Computed world-space transform for parts in a hierarchy.
//!
//! When a part has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`MapPosition`](super::mapposition::MapPosition), [`Rotation`](super::rotation::Rotation),
//! and [`Scale`](super::scale::Scale) are interpreted as local to the parent.
//! The [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! system computes the resulting world-space values and stores them here.

use bevy_ecs::prelude::*;
use glam::Vec2;

/// Computed world-space transform.
///
/// Managed by the transform propagation system. For root parts it mirrors
/// the local position/rotation/scale; for children it contains the composed
/// result of the full ancestor chain.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform2D {
    /// World-space position.
    pub position: Vec2,
    /// World-space rotation in degrees (around the screen-normal axis).
    pub rotation_degrees: f32,
    /// World-space scale.
    pub scale: Vec2,
}

impl Default for GlobalTransform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_degrees: 0.0,
            scale: Vec2::ONE,
        }
    }
}
