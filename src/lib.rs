//! Spritereel engine library.
//!
//! A hierarchical, frame-indexed sprite animation playback engine. Parts
//! form a tree; each part owns a dense keyframe track and, every tick,
//! replays the keyframes between its last applied frame and the timeline's
//! current frame, forward or backward. Opacity and visibility then compose
//! down the parent chain and leaf parts push derived state to their render
//! surface.
//!
//! This module exposes the engine's ECS components, resources, systems, and
//! messages for use in integration tests and as a reusable library.

pub mod components;
pub mod document;
pub mod error;
pub mod events;
pub mod player;
pub mod resources;
pub mod systems;
