//! Z-index component for render ordering.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). A renderer can sort surfaces by
/// `ZIndex` to achieve a painter's algorithm. Driven by the priority
/// attribute channel.
#[derive(
    Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ZIndex(pub i32);
