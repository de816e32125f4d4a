//! Keyframe reconciliation: the replay engine.
//!
//! Once per tick every part is brought from the frame it was last reconciled
//! to up to the timeline's current frame by replaying **every** keyframe in
//! between, not just the target frame's. Intermediate keys carry visibility
//! and opacity toggles that feed the change signal, and skipped mutations
//! must all land for hold-last-value playback to survive scrubbing.
//!
//! # Direction and wrap handling
//!
//! - Forward: replay `last+1 ..= frame`. If the cursor sits *past* the
//!   requested frame the timeline wrapped around, so the cursor resets to
//!   the start sentinel and the whole prefix replays.
//! - Reverse: replay `last-1 ..= frame` counting down. If the cursor sits
//!   *before* the requested frame, it resets to the end sentinel.
//!
//! The cursor always lands on the requested frame, even when an attribute
//! application fails mid-range; the reconcile system then halts that part so
//! it freezes at its last successfully-applied state while its siblings keep
//! animating.
//!
//! # Related
//!
//! - [`crate::components::track::KeyframeTrack`] – the replayed storage
//! - [`crate::components::attribute::Attribute`] – the applied mutations
//! - [`crate::systems::compose`] – derived state computed after the replay

use bevy_ecs::prelude::*;

use crate::components::attribute::Channels;
use crate::components::mapposition::MapPosition;
use crate::components::part::Part;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::surface::Surface;
use crate::components::tint::Tint;
use crate::components::track::KeyframeTrack;
use crate::components::zindex::ZIndex;
use crate::error::PlaybackError;
use crate::resources::cellmapstore::CellMapStore;
use crate::resources::timeline::Timeline;

/// Replay all keyframes between the part's cursor and `frame`, inclusive of
/// `frame`, exclusive of the cursor itself.
///
/// Tracks without any registered key fast-exit without touching part state.
/// Re-reconciling the frame the cursor already sits on replays nothing but
/// still clears the change flag.
pub fn replay_to(
    track: &KeyframeTrack,
    target: &mut Channels<'_>,
    cell_maps: &CellMapStore,
    frame: usize,
    reverse: bool,
) -> Result<(), PlaybackError> {
    if !track.has_keys() {
        return Ok(());
    }
    debug_assert!(
        frame < track.len(),
        "requested frame {} outside track of {} frames",
        frame,
        track.len()
    );

    target.part.changed = false;

    // -1 doubles as the unset sentinel and the forward pre-start cursor.
    let mut cursor: isize = target.part.last_applied.map_or(-1, |f| f as isize);
    let requested = frame as isize;
    if reverse {
        if cursor < requested {
            // The clock jumped forward while playing backwards: re-enter
            // from past the end and replay down to the requested frame.
            cursor = track.len() as isize;
        }
    } else if cursor > requested {
        // The clock wrapped backwards while playing forwards.
        cursor = -1;
    }

    let outcome = replay_range(track, target, cell_maps, cursor, requested, reverse);

    // Advance unconditionally so a failing keyframe does not re-fire on
    // every subsequent tick.
    target.part.last_applied = Some(frame);
    outcome
}

fn replay_range(
    track: &KeyframeTrack,
    target: &mut Channels<'_>,
    cell_maps: &CellMapStore,
    cursor: isize,
    requested: isize,
    reverse: bool,
) -> Result<(), PlaybackError> {
    if reverse {
        let mut f = cursor - 1;
        while f >= requested {
            replay_frame(track, target, cell_maps, f as usize)?;
            f -= 1;
        }
    } else {
        let mut f = cursor + 1;
        while f <= requested {
            replay_frame(track, target, cell_maps, f as usize)?;
            f += 1;
        }
    }
    Ok(())
}

fn replay_frame(
    track: &KeyframeTrack,
    target: &mut Channels<'_>,
    cell_maps: &CellMapStore,
    frame: usize,
) -> Result<(), PlaybackError> {
    let keyframe = track.frame(frame);
    target.part.changed |= keyframe.has_key();
    for attribute in keyframe.iter() {
        attribute.apply(cell_maps, target)?;
    }
    Ok(())
}

/// Reconcile every part to the timeline's current frame.
///
/// Parts reconcile in query order; composition
/// ([`compose_visuals`](crate::systems::compose::compose_visuals)) runs
/// after the whole pass, so the order cannot be observed. A part whose
/// replay fails is logged with its track length and the target frame,
/// halted, and skipped on subsequent ticks; the failure never stops sibling
/// parts from reconciling the same tick.
pub fn reconcile_parts(
    mut query: Query<(
        &KeyframeTrack,
        &mut Part,
        &mut MapPosition,
        &mut Rotation,
        &mut Scale,
        &mut ZIndex,
        &mut Tint,
        Option<&mut Surface>,
    )>,
    timeline: Res<Timeline>,
    cell_maps: Res<CellMapStore>,
) {
    let frame = timeline.current_frame;
    for (track, mut part, mut position, mut rotation, mut scale, mut z_index, mut tint, mut surface) in
        query.iter_mut()
    {
        if part.halted {
            continue;
        }
        let result = {
            let mut channels = Channels {
                part: &mut *part,
                position: &mut *position,
                rotation: &mut *rotation,
                scale: &mut *scale,
                z_index: &mut *z_index,
                tint: &mut *tint,
                surface: surface.as_deref_mut(),
            };
            replay_to(track, &mut channels, &cell_maps, frame, timeline.reverse)
        };
        if let Err(err) = result {
            log::error!(
                "replay failed for part '{}' at {}/{}: {}",
                part.name,
                track.len(),
                frame,
                err
            );
            part.halted = true;
        }
    }
}
