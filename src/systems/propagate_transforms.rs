//! Transform propagation for the part tree.
//!
//! Computes [`GlobalTransform2D`] for every part: local
//! position/rotation/scale compose down the hierarchy (child offsets are
//! scaled by the parent, then rotated; rotations add; scales multiply).
//!
//! # Schedule position
//!
//! Should run **after** reconciliation (which mutates local transforms) and
//! **before** composition so that surface pushes see this tick's world
//! positions.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;

fn rotate(v: Vec2, angle_degrees: f32) -> Vec2 {
    Vec2::from_angle(angle_degrees.to_radians()).rotate(v)
}

/// Propagate transforms from root parts down through the hierarchy.
///
/// Roots (no [`ChildOf`]) mirror their local transform, with or without
/// children; descendants compose with their parent at each level. Parts that
/// already have a `GlobalTransform2D` are updated in place; parts missing
/// the component get it inserted via deferred [`Commands`] (visible next
/// tick).
pub fn propagate_transforms(
    roots: Query<
        (
            Entity,
            &MapPosition,
            Option<&Rotation>,
            Option<&Scale>,
            Option<&Children>,
        ),
        Without<ChildOf>,
    >,
    children_query: Query<
        (
            &MapPosition,
            Option<&Rotation>,
            Option<&Scale>,
            Option<&Children>,
        ),
        With<ChildOf>,
    >,
    mut globals: Query<&mut GlobalTransform2D>,
    mut commands: Commands,
) {
    for (root_entity, pos, rot, scale, children) in roots.iter() {
        let root_gt = GlobalTransform2D {
            position: pos.pos,
            rotation_degrees: rot.map(|r| r.z()).unwrap_or(0.0),
            scale: scale.map(|s| s.scale).unwrap_or(Vec2::ONE),
        };

        if let Ok(mut gt) = globals.get_mut(root_entity) {
            *gt = root_gt;
        } else {
            commands.entity(root_entity).insert(root_gt);
        }

        if let Some(children) = children {
            propagate_children(
                &root_gt,
                children,
                &children_query,
                &mut globals,
                &mut commands,
            );
        }
    }
}

fn propagate_children(
    parent_gt: &GlobalTransform2D,
    children: &Children,
    children_query: &Query<
        (
            &MapPosition,
            Option<&Rotation>,
            Option<&Scale>,
            Option<&Children>,
        ),
        With<ChildOf>,
    >,
    globals: &mut Query<&mut GlobalTransform2D>,
    commands: &mut Commands,
) {
    for child_entity in children.iter() {
        let Ok((pos, rot, scale, maybe_grandchildren)) = children_query.get(child_entity) else {
            continue;
        };

        let local_rot = rot.map(|r| r.z()).unwrap_or(0.0);
        let local_scale = scale.map(|s| s.scale).unwrap_or(Vec2::ONE);

        // Scale the child's local offset by the parent's scale, then rotate.
        let rotated_offset = rotate(pos.pos * parent_gt.scale, parent_gt.rotation_degrees);

        let child_gt = GlobalTransform2D {
            position: parent_gt.position + rotated_offset,
            rotation_degrees: parent_gt.rotation_degrees + local_rot,
            scale: parent_gt.scale * local_scale,
        };

        if let Ok(mut gt) = globals.get_mut(child_entity) {
            *gt = child_gt;
        } else {
            commands.entity(child_entity).insert(child_gt);
        }

        if let Some(grandchildren) = maybe_grandchildren {
            propagate_children(&child_gt, grandchildren, children_query, globals, commands);
        }
    }
}
