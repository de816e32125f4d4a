//! Playback state for one node of the animated part tree.
//!
//! A part is an entity carrying a [`Part`] component, an owned
//! [`KeyframeTrack`](super::track::KeyframeTrack), the channel components the
//! attributes mutate, and (for visual parts) a
//! [`Surface`](super::surface::Surface). The tree itself is expressed with
//! [`ChildOf`](bevy_ecs::hierarchy::ChildOf)/[`Children`](bevy_ecs::hierarchy::Children).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Whether a part owns a render surface or is a structural node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Ordinary part with a render surface.
    #[default]
    Visual,
    /// Structural node: animates transform/opacity/visibility for its
    /// descendants but draws nothing itself.
    Null,
}

/// Per-part playback state driven by the reconcile system.
#[derive(Component, Debug, Clone)]
pub struct Part {
    pub name: String,
    pub kind: NodeKind,
    /// Frame this part was last reconciled to. `None` before the first
    /// reconciliation.
    pub last_applied: Option<usize>,
    /// True iff at least one keyframe in the just-replayed range had entries.
    pub changed: bool,
    /// Set after a replay failure; the reconcile system stops driving a
    /// halted part and it freezes at its last applied state.
    pub halted: bool,
    /// Local opacity, composed multiplicatively down the parent chain.
    pub local_alpha: f32,
    /// Local visibility; stays false until a keyframe turns the part on.
    pub local_visible: bool,
}

impl Part {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            last_applied: None,
            changed: false,
            halted: false,
            local_alpha: 1.0,
            local_visible: false,
        }
    }

    pub fn is_visual(&self) -> bool {
        self.kind == NodeKind::Visual
    }
}
