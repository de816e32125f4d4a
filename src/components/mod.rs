//! ECS components for animated parts.
//!
//! This module groups the component types attached to part entities: the
//! playback state machine, the keyframe storage it replays, the channel
//! components attributes mutate, and the render-surface boundary.
//!
//! Submodules overview:
//! - [`attribute`] – the closed set of per-keyframe state mutations
//! - [`globaltransform2d`] – computed world-space transform for hierarchy members
//! - [`mapposition`] – local position (pivot) of a part
//! - [`part`] – per-part playback state (cursor, change flag, alpha, visibility)
//! - [`rotation`] – per-axis rotation in degrees
//! - [`scale`] – 2D scale factor
//! - [`surface`] – derived render output consumed by a backend
//! - [`tint`] – color blend multipliers
//! - [`track`] – dense frame-indexed keyframe storage
//! - [`zindex`] – rendering order hint

pub mod attribute;
pub mod globaltransform2d;
pub mod mapposition;
pub mod part;
pub mod rotation;
pub mod scale;
pub mod surface;
pub mod tint;
pub mod track;
pub mod zindex;
