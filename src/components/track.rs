//! Keyframe storage: one dense track per part.
//!
//! A [`KeyframeTrack`] has exactly one [`Keyframe`] slot per frame of the
//! animation, indexed `0..total_frames`. Slots start empty; the import
//! boundary fills them by appending attributes with [`KeyframeTrack::add_key`].
//! The track is read-only once import finishes.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use super::attribute::Attribute;

/// The attribute mutations scheduled at one frame index.
///
/// Insertion order is preserved and is the order of application during
/// replay, so a later entry targeting the same channel wins.
#[derive(Debug, Clone, Default)]
pub struct Keyframe {
    attributes: SmallVec<[Attribute; 2]>,
}

impl Keyframe {
    /// Whether this keyframe carries at least one attribute.
    pub fn has_key(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Dense, frame-indexed keyframe storage owned by a single part.
#[derive(Component, Debug, Clone)]
pub struct KeyframeTrack {
    frames: Vec<Keyframe>,
    key_count: usize,
}

impl KeyframeTrack {
    /// Allocate an empty track with one slot per frame.
    pub fn new(total_frames: usize) -> Self {
        Self {
            frames: vec![Keyframe::default(); total_frames],
            key_count: 0,
        }
    }

    /// Number of frame slots (the animation's total frame count).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether any keyframe in the whole track carries attributes. Replay
    /// fast-exits on tracks without keys.
    pub fn has_keys(&self) -> bool {
        self.key_count > 0
    }

    /// Total number of registered attributes across all frames.
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Append an attribute to the keyframe at `frame`.
    ///
    /// Source animation data is known to contain keys past the end of the
    /// track; those are dropped with a warning instead of growing the track
    /// or panicking.
    pub fn add_key(&mut self, frame: usize, attribute: Attribute) {
        if frame >= self.frames.len() {
            log::warn!(
                "key frame '{:?} ({})' is out of range in track of {} frames, dropping",
                attribute,
                frame,
                self.frames.len()
            );
            return;
        }
        self.frames[frame].push(attribute);
        self.key_count += 1;
    }

    pub fn frame(&self, index: usize) -> &Keyframe {
        &self.frames[index]
    }
}
