//! Error types for playback and document import.
//!
//! [`PlaybackError`] covers failures raised while replaying keyframe
//! attributes (dangling cell references). [`DocumentError`] covers failures
//! while loading or spawning an animation document.

use thiserror::Error;

/// Failure raised by an attribute application during replay.
///
/// A part whose replay fails is halted by the reconcile system: its cursor
/// still advances to the requested frame (so the same failure does not
/// re-fire every tick) and it freezes at the last successfully-applied
/// visual state. Other parts keep reconciling.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("cell map {map} is out of range ({count} maps loaded)")]
    CellMapOutOfRange { map: usize, count: usize },
    #[error("cell {cell} is out of range in cell map {map} ({count} cells)")]
    CellOutOfRange { map: usize, cell: usize, count: usize },
}

/// Failure raised while loading or spawning an animation document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read animation document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse animation document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("animation document '{0}' declares zero frames")]
    ZeroFrames(String),
    #[error("duplicate part name '{0}'")]
    DuplicatePart(String),
    #[error("part '{part}' references unknown parent '{parent}' (parents must be declared before their children)")]
    UnknownParent { part: String, parent: String },
}
