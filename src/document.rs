//! Animation document loading and part setup.
//!
//! The import boundary: a JSON document describes one animation (timeline
//! parameters, cell maps, and the part tree with its key records) and
//! [`spawn_document`] turns it into a populated world. Parts are declared
//! parent-first; each key record carries a frame index and one attribute.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "name": "walk",
//!   "total_frames": 24,
//!   "fps": 30.0,
//!   "cell_maps": [
//!     { "name": "chara", "texture_key": "chara.png", "cells": [
//!       { "name": "body", "uv_min": [0.0, 0.0], "uv_max": [0.5, 0.5],
//!         "size": [64.0, 64.0] }
//!     ] }
//!   ],
//!   "parts": [
//!     { "name": "root", "kind": "null" },
//!     { "name": "body", "parent": "root", "keys": [
//!       { "frame": 0, "channel": "visibility", "visible": true },
//!       { "frame": 0, "channel": "cell", "map": 0, "cell": 0 },
//!       { "frame": 12, "channel": "opacity", "value": 0.5 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Key records whose frame index falls past the end of the track are dropped
//! with a warning; source animation data is known to contain them.

use std::path::Path;

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::attribute::Attribute;
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::mapposition::MapPosition;
use crate::components::part::{NodeKind, Part};
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::surface::Surface;
use crate::components::tint::Tint;
use crate::components::track::KeyframeTrack;
use crate::components::zindex::ZIndex;
use crate::error::DocumentError;
use crate::events::timeline::TimelineMessage;
use crate::resources::cellmapstore::{CellMap, CellMapStore};
use crate::resources::timeline::Timeline;

fn default_fps() -> f32 {
    30.0
}

fn default_true() -> bool {
    true
}

/// One key record: an attribute scheduled at a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDoc {
    pub frame: usize,
    #[serde(flatten)]
    pub attribute: Attribute,
}

/// One part of the animated tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDoc {
    pub name: String,
    /// Name of the parent part; must be declared earlier in the document.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub keys: Vec<KeyDoc>,
}

/// A complete animation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDoc {
    pub name: String,
    pub total_frames: usize,
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default = "default_true")]
    pub looped: bool,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub cell_maps: Vec<CellMap>,
    pub parts: Vec<PartDoc>,
}

impl AnimationDoc {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Spawn one part with its track and channel components at defaults.
///
/// The setup boundary: allocates a [`KeyframeTrack`] sized to `total_frames`
/// and attaches a [`Surface`] unless the part is structural. The import side
/// fills the track afterwards through
/// [`KeyframeTrack::add_key`](crate::components::track::KeyframeTrack::add_key).
pub fn spawn_part(
    world: &mut World,
    name: &str,
    kind: NodeKind,
    parent: Option<Entity>,
    total_frames: usize,
) -> Entity {
    let mut entity = world.spawn((
        Part::new(name, kind),
        KeyframeTrack::new(total_frames),
        MapPosition::default(),
        Rotation::default(),
        Scale::default(),
        ZIndex::default(),
        Tint::default(),
        GlobalTransform2D::default(),
    ));
    if kind == NodeKind::Visual {
        entity.insert(Surface::default());
    }
    if let Some(parent) = parent {
        entity.insert(ChildOf(parent));
    }
    entity.id()
}

/// Build a world from a document: timeline and cell-map resources, the part
/// tree, and every in-range key record.
///
/// Returns the spawned entities by part name. Fails on a zero-length
/// timeline, duplicate part names, or a parent reference to a part not yet
/// declared; out-of-range key records only warn.
pub fn spawn_document(
    world: &mut World,
    doc: &AnimationDoc,
) -> Result<FxHashMap<String, Entity>, DocumentError> {
    if doc.total_frames == 0 {
        return Err(DocumentError::ZeroFrames(doc.name.clone()));
    }

    world.insert_resource(
        Timeline::new(doc.total_frames, doc.fps)
            .with_looped(doc.looped)
            .with_reverse(doc.reverse),
    );
    world.insert_resource(CellMapStore::new(doc.cell_maps.clone()));
    world.init_resource::<Messages<TimelineMessage>>();

    let mut entities: FxHashMap<String, Entity> = FxHashMap::default();
    for part_doc in &doc.parts {
        if entities.contains_key(&part_doc.name) {
            return Err(DocumentError::DuplicatePart(part_doc.name.clone()));
        }
        let parent = match &part_doc.parent {
            Some(parent_name) => Some(*entities.get(parent_name.as_str()).ok_or_else(|| {
                DocumentError::UnknownParent {
                    part: part_doc.name.clone(),
                    parent: parent_name.clone(),
                }
            })?),
            None => None,
        };

        let entity = spawn_part(world, &part_doc.name, part_doc.kind, parent, doc.total_frames);
        if let Some(mut track) = world.get_mut::<KeyframeTrack>(entity) {
            for key in &part_doc.keys {
                track.add_key(key.frame, key.attribute.clone());
            }
        }
        entities.insert(part_doc.name.clone(), entity);
    }

    // Materialize Children on parents before the first schedule run.
    world.flush();

    log::debug!(
        "spawned animation '{}': {} parts, {} frames, {} cell maps",
        doc.name,
        entities.len(),
        doc.total_frames,
        doc.cell_maps.len()
    );

    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "blink",
        "total_frames": 8,
        "parts": [
            { "name": "root", "kind": "null" },
            { "name": "eye", "parent": "root", "keys": [
                { "frame": 0, "channel": "visibility", "visible": true },
                { "frame": 4, "channel": "opacity", "value": 0.25 }
            ] }
        ]
    }"#;

    #[test]
    fn parses_a_minimal_document() {
        let doc = AnimationDoc::from_json(MINIMAL).unwrap();
        assert_eq!(doc.total_frames, 8);
        assert_eq!(doc.fps, 30.0, "fps defaults when omitted");
        assert!(doc.looped, "documents loop unless they opt out");
        assert_eq!(doc.parts.len(), 2);
        assert_eq!(doc.parts[0].kind, NodeKind::Null);
        assert_eq!(
            doc.parts[1].keys[1].attribute,
            Attribute::Opacity { value: 0.25 }
        );
    }

    #[test]
    fn key_docs_flatten_the_attribute_tag() {
        let key: KeyDoc = serde_json::from_str(
            r#"{ "frame": 3, "channel": "flip", "axis": "horizontal", "flipped": true }"#,
        )
        .unwrap();
        assert_eq!(key.frame, 3);
        assert!(matches!(key.attribute, Attribute::Flip { flipped: true, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AnimationDoc::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}
