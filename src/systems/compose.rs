//! Parent-chain composition and the surface push.
//!
//! After every part has reconciled, the derived values are recomputed from
//! scratch: effective opacity is the product of local opacities up the
//! ancestor chain, effective visibility their conjunction, and a part needs
//! a repaint when it or any ancestor changed this tick (an ancestor's motion
//! moves this part's world-space quad even without a local key).
//!
//! Nothing is cached across ticks; the walks are pure reads over
//! [`ChildOf`] links, so the order in which parts reconciled cannot be
//! observed here.
//!
//! # Schedule position
//!
//! Runs after [`reconcile_parts`](crate::systems::reconcile::reconcile_parts)
//! and [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! so that surfaces see this tick's attribute state and world transforms.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::part::Part;
use crate::components::surface::Surface;

/// Parent-composited opacity: the product of local alphas from `entity` up
/// to the tree root.
pub fn effective_alpha(entity: Entity, parts: &Query<(&Part, Option<&ChildOf>)>) -> f32 {
    let mut alpha = 1.0;
    let mut next = Some(entity);
    while let Some(current) = next {
        let Ok((part, child_of)) = parts.get(current) else {
            break;
        };
        alpha *= part.local_alpha;
        next = child_of.map(|c| c.0);
    }
    alpha
}

/// Parent-composited visibility: false as soon as any node on the chain is
/// locally hidden.
pub fn effective_visible(entity: Entity, parts: &Query<(&Part, Option<&ChildOf>)>) -> bool {
    let mut next = Some(entity);
    while let Some(current) = next {
        let Ok((part, child_of)) = parts.get(current) else {
            break;
        };
        if !part.local_visible {
            return false;
        }
        next = child_of.map(|c| c.0);
    }
    true
}

/// Whether `entity` must repaint: it, or any ancestor, replayed a non-empty
/// keyframe this tick.
pub fn needs_render(entity: Entity, parts: &Query<(&Part, Option<&ChildOf>)>) -> bool {
    let mut next = Some(entity);
    while let Some(current) = next {
        let Ok((part, child_of)) = parts.get(current) else {
            break;
        };
        if part.changed {
            return true;
        }
        next = child_of.map(|c| c.0);
    }
    false
}

/// Push derived state to every surface whose part needs a repaint.
///
/// Writes effective alpha, the active/inactive toggle, and the world
/// transform snapshot. Surfaces of unchanged subtrees keep last tick's
/// values untouched.
pub fn compose_visuals(
    parts: Query<(&Part, Option<&ChildOf>)>,
    mut surfaces: Query<(Entity, &mut Surface, &GlobalTransform2D)>,
) {
    for (entity, mut surface, transform) in surfaces.iter_mut() {
        if !needs_render(entity, &parts) {
            continue;
        }
        surface.alpha = effective_alpha(entity, &parts);
        surface.active = effective_visible(entity, &parts);
        surface.transform = *transform;
    }
}
