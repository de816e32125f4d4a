//! Playback lifecycle messages emitted by the timeline driver.
//!
//! [`TimelineMessage`] is written by
//! [`advance_timeline`](crate::systems::timeline::advance_timeline) whenever
//! the clock passes an end of the track. Consumers read it through a
//! [`MessageReader`](bevy_ecs::prelude::MessageReader); the player schedule
//! pumps the mailbox once per tick.

use bevy_ecs::message::Message;

/// Notification that the playback clock hit an end of the track.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineMessage {
    /// A looping animation wrapped to the opposite end.
    Wrapped {
        /// Direction the clock was moving when it wrapped.
        reverse: bool,
    },
    /// A non-looping animation reached its end and stopped.
    Finished,
}
