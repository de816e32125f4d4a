//! The global playback clock.
//!
//! [`Timeline`] owns the current frame, the constant total frame count, and
//! the play direction. Engine systems read it through `Res<Timeline>` once
//! per tick and never mutate it; only the driver
//! ([`advance_timeline`](crate::systems::timeline::advance_timeline)) steps
//! it forward.

use bevy_ecs::prelude::Resource;

/// Outcome of one [`Timeline::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineAdvance {
    /// Whole frames stepped out of the accumulator.
    pub frames_stepped: u32,
    /// The clock passed an end of the track and wrapped to the other side.
    pub wrapped: bool,
    /// A non-looping animation reached its end and stopped.
    pub finished: bool,
}

/// Global frame counter, direction flag, and playback machinery shared by
/// all parts of one animation.
#[derive(Resource, Debug, Clone)]
pub struct Timeline {
    /// Frame the animation currently sits on, `0..total_frames`.
    pub current_frame: usize,
    /// Track length; constant for the animation's lifetime.
    pub total_frames: usize,
    /// Play direction; true means backwards.
    pub reverse: bool,
    /// Authored playback speed in frames per second.
    pub fps: f32,
    pub playing: bool,
    pub looped: bool,
    accumulator: f32,
}

impl Timeline {
    pub fn new(total_frames: usize, fps: f32) -> Self {
        Self {
            current_frame: 0,
            total_frames,
            reverse: false,
            fps,
            playing: true,
            looped: true,
            accumulator: 0.0,
        }
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        if reverse && self.total_frames > 0 {
            self.current_frame = self.total_frames - 1;
        }
        self
    }

    pub fn frame_duration(&self) -> f32 {
        1.0 / self.fps
    }

    /// Accumulate `dt` seconds and step whole frames out of the accumulator,
    /// wrapping or stopping at the track ends.
    pub fn advance(&mut self, dt: f32) -> TimelineAdvance {
        let mut outcome = TimelineAdvance::default();
        if !self.playing || self.total_frames == 0 {
            return outcome;
        }

        self.accumulator += dt;
        let frame_duration = self.frame_duration();
        while self.accumulator >= frame_duration {
            self.accumulator -= frame_duration;
            if self.reverse {
                if self.current_frame > 0 {
                    self.current_frame -= 1;
                } else if self.looped {
                    self.current_frame = self.total_frames - 1;
                    outcome.wrapped = true;
                } else {
                    self.playing = false;
                    outcome.finished = true;
                    break;
                }
            } else if self.current_frame + 1 < self.total_frames {
                self.current_frame += 1;
            } else if self.looped {
                self.current_frame = 0;
                outcome.wrapped = true;
            } else {
                self.playing = false;
                outcome.finished = true;
                break;
            }
            outcome.frames_stepped += 1;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_whole_frames_only() {
        let mut tl = Timeline::new(10, 10.0); // 0.1s per frame
        let out = tl.advance(0.05);
        assert_eq!(out.frames_stepped, 0);
        assert_eq!(tl.current_frame, 0);

        let out = tl.advance(0.05);
        assert_eq!(out.frames_stepped, 1);
        assert_eq!(tl.current_frame, 1);
    }

    #[test]
    fn advance_steps_multiple_frames_on_large_dt() {
        let mut tl = Timeline::new(10, 10.0);
        let out = tl.advance(0.35);
        assert_eq!(out.frames_stepped, 3);
        assert_eq!(tl.current_frame, 3);
    }

    #[test]
    fn looped_forward_wraps_to_zero() {
        let mut tl = Timeline::new(3, 10.0);
        tl.current_frame = 2;
        let out = tl.advance(0.1);
        assert_eq!(tl.current_frame, 0);
        assert!(out.wrapped);
        assert!(tl.playing);
    }

    #[test]
    fn non_looped_forward_stops_on_last_frame() {
        let mut tl = Timeline::new(3, 10.0).with_looped(false);
        tl.current_frame = 2;
        let out = tl.advance(0.1);
        assert_eq!(tl.current_frame, 2);
        assert!(out.finished);
        assert!(!tl.playing);

        // Further advances are inert.
        let out = tl.advance(1.0);
        assert_eq!(out, TimelineAdvance::default());
    }

    #[test]
    fn reverse_starts_from_last_frame_and_wraps_up() {
        let mut tl = Timeline::new(5, 10.0).with_reverse(true);
        assert_eq!(tl.current_frame, 4);

        let out = tl.advance(0.4);
        assert_eq!(out.frames_stepped, 4);
        assert_eq!(tl.current_frame, 0);

        let out = tl.advance(0.1);
        assert!(out.wrapped);
        assert_eq!(tl.current_frame, 4);
    }

    #[test]
    fn zero_length_timeline_never_advances() {
        let mut tl = Timeline::new(0, 10.0);
        let out = tl.advance(10.0);
        assert_eq!(out, TimelineAdvance::default());
    }
}
