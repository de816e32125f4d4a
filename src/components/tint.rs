//! Color blend component for surface modulation.

use bevy_ecs::prelude::Component;
use glam::Vec4;
use serde::{Deserialize, Serialize};

/// RGBA color multipliers (0..=1 per channel) applied to a part's surface.
///
/// Driven by the color-blend attribute channel; white (all ones) leaves the
/// texture untouched.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub rgba: Vec4,
}

impl Default for Tint {
    fn default() -> Self {
        Self { rgba: Vec4::ONE }
    }
}
