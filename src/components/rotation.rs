use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-axis rotation in degrees. Source keys can target all three axes; the
/// 2D world transform only consumes `z`.
#[derive(Component, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub degrees: Vec3,
}

impl Rotation {
    pub fn from_z(degrees: f32) -> Self {
        Self {
            degrees: Vec3::new(0.0, 0.0, degrees),
        }
    }

    /// Rotation around the screen-normal axis, the one that matters in 2D.
    pub fn z(&self) -> f32 {
        self.degrees.z
    }
}
