//! Headless playback driver.
//!
//! Owns the per-tick pipeline shared by the player binary and the
//! integration tests: advance the clock, then run the engine systems in
//! their required order (reconcile → propagate transforms → compose →
//! message pump).

use bevy_ecs::prelude::*;

use crate::systems::compose::compose_visuals;
use crate::systems::propagate_transforms::propagate_transforms;
use crate::systems::reconcile::reconcile_parts;
use crate::systems::timeline::{advance_timeline, update_timeline_messages};

/// Build the engine schedule.
///
/// The chain is load-bearing: composition must observe the state left by
/// *all* reconciliations of the tick, and surface pushes need this tick's
/// world transforms.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            reconcile_parts,
            propagate_transforms,
            compose_visuals,
            update_timeline_messages,
        )
            .chain(),
    );
    schedule
}

/// Drive one tick: step the timeline by `dt` seconds, then run the engine
/// pipeline.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    advance_timeline(world, dt);
    schedule.run(world);
}
