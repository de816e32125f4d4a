//! Cell map registry.
//!
//! A cell map names a texture atlas and the rectangular cells cut out of it.
//! Cell-selection keys reference cells by `(map index, cell index)`; the
//! store resolves those into UV rectangles, sizes, and pivots. Populated
//! once at import time, read-only afterwards.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

fn default_pivot() -> Vec2 {
    Vec2::splat(0.5)
}

/// One rectangular region of an atlas texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    /// Texture-space rectangle, normalized 0..=1.
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    /// Quad size in world units.
    pub size: Vec2,
    /// Normalized pivot inside the quad.
    #[serde(default = "default_pivot")]
    pub pivot: Vec2,
}

/// An atlas texture with its ordered cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMap {
    pub name: String,
    /// Key the rendering backend uses to look up the atlas texture.
    pub texture_key: String,
    pub cells: Vec<Cell>,
}

/// Ordered registry of the cell maps one animation references.
#[derive(Resource, Debug, Clone, Default)]
pub struct CellMapStore {
    maps: Vec<CellMap>,
    by_name: FxHashMap<String, usize>,
}

impl CellMapStore {
    pub fn new(maps: Vec<CellMap>) -> Self {
        let by_name = maps
            .iter()
            .enumerate()
            .map(|(index, map)| (map.name.clone(), index))
            .collect();
        Self { maps, by_name }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn map(&self, map: usize) -> Result<&CellMap, PlaybackError> {
        self.maps.get(map).ok_or(PlaybackError::CellMapOutOfRange {
            map,
            count: self.maps.len(),
        })
    }

    /// Resolve a `(map, cell)` reference, the fallible half of cell-selection
    /// keys.
    pub fn cell(&self, map: usize, cell: usize) -> Result<&Cell, PlaybackError> {
        let cell_map = self.map(map)?;
        cell_map
            .cells
            .get(cell)
            .ok_or(PlaybackError::CellOutOfRange {
                map,
                cell,
                count: cell_map.cells.len(),
            })
    }
}
