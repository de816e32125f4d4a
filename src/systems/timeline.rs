//! Timeline driver.
//!
//! Steps the shared [`Timeline`](crate::resources::timeline::Timeline)
//! resource once per tick and reports wrap/finish transitions through the
//! [`TimelineMessage`] mailbox.

use bevy_ecs::prelude::*;

use crate::events::timeline::TimelineMessage;
use crate::resources::timeline::Timeline;

/// Accumulate `dt` seconds on the timeline and step whole frames.
///
/// `dt` is the unscaled tick delta in seconds. Wrap and finish transitions
/// are written as [`TimelineMessage`]s when the mailbox resource exists.
pub fn advance_timeline(world: &mut World, dt: f32) {
    let outcome = world.resource_mut::<Timeline>().advance(dt);
    if !outcome.wrapped && !outcome.finished {
        return;
    }
    let reverse = world.resource::<Timeline>().reverse;
    if let Some(mut messages) = world.get_resource_mut::<Messages<TimelineMessage>>() {
        if outcome.wrapped {
            messages.write(TimelineMessage::Wrapped { reverse });
        }
        if outcome.finished {
            messages.write(TimelineMessage::Finished);
        }
    }
}

/// Advance the [`Messages<TimelineMessage>`] queue so this tick's writes
/// become visible to readers. Run once per tick, after the engine systems.
pub fn update_timeline_messages(mut messages: ResMut<Messages<TimelineMessage>>) {
    messages.update();
}
