//! The attribute capability set: one atomic, absolute-value mutation per
//! variant.
//!
//! Attributes are immutable value objects built once at import time; applying
//! one mutates exactly one aspect of a part's state. Every variant sets an
//! absolute value (no accumulating deltas), so re-applying an attribute with
//! the same payload yields the same resulting state. The set is closed and
//! known at design time, dispatched by pattern matching in
//! [`Attribute::apply`].
//!
//! Surface-targeting variants (flip, cell selection, UV offset) applied to a
//! structural part without a surface are silent no-ops, mirroring how a
//! renderer-less node ignores render-channel keys.
//!
//! # Related
//!
//! - [`crate::components::track::Keyframe`] – schedules attributes at a frame
//! - [`crate::systems::reconcile`] – replays them over a frame range

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::components::mapposition::MapPosition;
use crate::components::part::Part;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::surface::Surface;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::error::PlaybackError;
use crate::resources::cellmapstore::CellMapStore;

/// 2D axis selector for position, scale, and UV offset channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Rotation axis. Only `Z` participates in the 2D world transform; X and Y
/// keys from source data are stored on the part all the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Mirror axis for flip keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// A mutable view of one part's channel components, assembled by the
/// reconcile system for the duration of a replay.
pub struct Channels<'a> {
    pub part: &'a mut Part,
    pub position: &'a mut MapPosition,
    pub rotation: &'a mut Rotation,
    pub scale: &'a mut Scale,
    pub z_index: &'a mut ZIndex,
    pub tint: &'a mut Tint,
    /// `None` for structural (null) parts.
    pub surface: Option<&'a mut Surface>,
}

/// One atomic state mutation scheduled by a keyframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Attribute {
    /// Set one channel of the local position.
    Position { axis: Axis, value: f32 },
    /// Set rotation degrees on one axis.
    Rotation { axis: RotationAxis, value: f32 },
    /// Set one channel of the local scale.
    Scale { axis: Axis, value: f32 },
    /// Set local opacity (clamped to 0..=1).
    Opacity { value: f32 },
    /// Set local visibility. An absolute set, not a toggle.
    Visibility { visible: bool },
    /// Mirror the surface along one axis.
    Flip { axis: FlipAxis, flipped: bool },
    /// Select a cell-map entry; resolves the cell's UV rectangle, size, and
    /// pivot into the surface.
    Cell { map: usize, cell: usize },
    /// Scroll the surface's UV rectangle along one axis.
    UvOffset { axis: Axis, value: f32 },
    /// Draw-order hint.
    Priority { value: i32 },
    /// Color blend (RGBA multipliers in 0..=1).
    ColorBlend { rgba: [f32; 4] },
}

impl Attribute {
    /// Apply this attribute to one part's channels.
    ///
    /// The only fallible path is cell selection against `cell_maps`; every
    /// other variant cannot fail for well-formed input.
    pub fn apply(
        &self,
        cell_maps: &CellMapStore,
        target: &mut Channels<'_>,
    ) -> Result<(), PlaybackError> {
        match *self {
            Attribute::Position { axis, value } => match axis {
                Axis::X => target.position.pos.x = value,
                Axis::Y => target.position.pos.y = value,
            },
            Attribute::Rotation { axis, value } => match axis {
                RotationAxis::X => target.rotation.degrees.x = value,
                RotationAxis::Y => target.rotation.degrees.y = value,
                RotationAxis::Z => target.rotation.degrees.z = value,
            },
            Attribute::Scale { axis, value } => match axis {
                Axis::X => target.scale.scale.x = value,
                Axis::Y => target.scale.scale.y = value,
            },
            Attribute::Opacity { value } => {
                target.part.local_alpha = value.clamp(0.0, 1.0);
            }
            Attribute::Visibility { visible } => {
                target.part.local_visible = visible;
            }
            Attribute::Flip { axis, flipped } => {
                if let Some(surface) = target.surface.as_deref_mut() {
                    match axis {
                        FlipAxis::Horizontal => surface.flip_h = flipped,
                        FlipAxis::Vertical => surface.flip_v = flipped,
                    }
                }
            }
            Attribute::Cell { map, cell } => {
                if let Some(surface) = target.surface.as_deref_mut() {
                    let resolved = cell_maps.cell(map, cell)?;
                    surface.set_cell(map, cell, resolved);
                }
            }
            Attribute::UvOffset { axis, value } => {
                if let Some(surface) = target.surface.as_deref_mut() {
                    match axis {
                        Axis::X => surface.uv_offset.x = value,
                        Axis::Y => surface.uv_offset.y = value,
                    }
                }
            }
            Attribute::Priority { value } => {
                target.z_index.0 = value;
            }
            Attribute::ColorBlend { rgba } => {
                target.tint.rgba = Vec4::from_array(rgba);
            }
        }
        Ok(())
    }
}
