//! The render-surface boundary of a visual part.
//!
//! [`Surface`] is the component a rendering backend consumes: the engine
//! pushes derived state into it once per tick when the part needs a repaint
//! and never reads anything back. Vertex buffers, materials, and draw calls
//! live entirely on the other side of this boundary.
//!
//! Attribute channels write the authored fields (cell selection, UV offset,
//! flips); the compose system writes the pushed outputs (effective alpha,
//! active flag, world transform snapshot).

use bevy_ecs::prelude::Component;
use glam::Vec2;

use super::globaltransform2d::GlobalTransform2D;
use crate::resources::cellmapstore::Cell;

/// Identifies the cell a surface currently displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub map: usize,
    pub cell: usize,
}

/// Derived per-part output consumed by a rendering backend.
#[derive(Component, Clone, Debug)]
pub struct Surface {
    /// Cell-map entry currently selected, if any key has fired yet.
    pub cell: Option<CellRef>,
    /// Quad size in world units (taken from the selected cell).
    pub size: Vec2,
    /// Normalized pivot inside the quad; (0.5, 0.5) is the center.
    pub pivot: Vec2,
    /// Texture-space rectangle of the selected cell.
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    /// Scroll offset applied to the UV rectangle at render time.
    pub uv_offset: Vec2,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Effective (parent-composited) opacity, pushed by the compose system.
    pub alpha: f32,
    /// Effective visibility as an active/inactive toggle, pushed by the
    /// compose system.
    pub active: bool,
    /// World transform snapshot at the last push.
    pub transform: GlobalTransform2D,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            cell: None,
            size: Vec2::ZERO,
            pivot: Vec2::splat(0.5),
            uv_min: Vec2::ZERO,
            uv_max: Vec2::ONE,
            uv_offset: Vec2::ZERO,
            flip_h: false,
            flip_v: false,
            alpha: 1.0,
            active: false,
            transform: GlobalTransform2D::default(),
        }
    }
}

impl Surface {
    /// Adopt a resolved cell: UV rectangle, quad size, and pivot.
    pub fn set_cell(&mut self, map: usize, cell_index: usize, cell: &Cell) {
        self.cell = Some(CellRef {
            map,
            cell: cell_index,
        });
        self.uv_min = cell.uv_min;
        self.uv_max = cell.uv_max;
        self.size = cell.size;
        self.pivot = cell.pivot;
    }

    /// UV rectangle after scrolling and flips. Flips mirror the texture by
    /// swapping the rectangle's coordinates, leaving the quad geometry
    /// untouched.
    pub fn uv_rect(&self) -> (Vec2, Vec2) {
        let mut lo = self.uv_min + self.uv_offset;
        let mut hi = self.uv_max + self.uv_offset;
        if self.flip_h {
            std::mem::swap(&mut lo.x, &mut hi.x);
        }
        if self.flip_v {
            std::mem::swap(&mut lo.y, &mut hi.y);
        }
        (lo, hi)
    }

    /// World-space quad corners in left-top, right-top, left-bottom,
    /// right-bottom order (y grows downward), pivot-relative, scaled then
    /// rotated by the pushed transform.
    pub fn corners(&self) -> [Vec2; 4] {
        let min = -self.pivot * self.size;
        let max = (Vec2::ONE - self.pivot) * self.size;
        let locals = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
        ];
        let rot = Vec2::from_angle(self.transform.rotation_degrees.to_radians());
        locals.map(|corner| self.transform.position + rot.rotate(corner * self.transform.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn corners_center_pivot_no_transform() {
        let surface = Surface {
            size: Vec2::new(10.0, 20.0),
            ..Default::default()
        };
        let [lt, rt, lb, rb] = surface.corners();
        assert!(approx_eq(lt, Vec2::new(-5.0, -10.0)));
        assert!(approx_eq(rt, Vec2::new(5.0, -10.0)));
        assert!(approx_eq(lb, Vec2::new(-5.0, 10.0)));
        assert!(approx_eq(rb, Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn corners_follow_translation_and_scale() {
        let surface = Surface {
            size: Vec2::new(10.0, 10.0),
            transform: GlobalTransform2D {
                position: Vec2::new(100.0, 50.0),
                rotation_degrees: 0.0,
                scale: Vec2::new(2.0, 1.0),
            },
            ..Default::default()
        };
        let [lt, _, _, rb] = surface.corners();
        assert!(approx_eq(lt, Vec2::new(90.0, 45.0)));
        assert!(approx_eq(rb, Vec2::new(110.0, 55.0)));
    }

    #[test]
    fn corners_rotate_around_pivot() {
        let surface = Surface {
            size: Vec2::new(10.0, 10.0),
            transform: GlobalTransform2D {
                rotation_degrees: 90.0,
                ..Default::default()
            },
            ..Default::default()
        };
        // Left-top (-5, -5) rotated 90 degrees lands at (5, -5).
        let [lt, ..] = surface.corners();
        assert!(approx_eq(lt, Vec2::new(5.0, -5.0)));
    }

    #[test]
    fn uv_rect_applies_offset_and_flip() {
        let surface = Surface {
            uv_min: Vec2::new(0.0, 0.0),
            uv_max: Vec2::new(0.5, 0.5),
            uv_offset: Vec2::new(0.25, 0.0),
            flip_h: true,
            ..Default::default()
        };
        let (lo, hi) = surface.uv_rect();
        assert!(approx_eq(lo, Vec2::new(0.75, 0.0)));
        assert!(approx_eq(hi, Vec2::new(0.25, 0.5)));
    }
}
