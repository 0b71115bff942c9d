// SPDX-License-Identifier: MIT OR Apache-2.0
//! Clip definitions for the sequencer.

use crate::curve::Curve;
use crate::value::GenericValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length given to a freshly inserted clip, and the shortest span the editor
/// lets a clip shrink to
pub const MIN_INTERVAL: f32 = 0.01;

/// Unique identifier for a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub Uuid);

impl ClipId {
    /// Create a new random clip ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of evaluating a clip at some time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSample {
    /// Clip that produced the sample
    pub clip: ClipId,
    /// Clip start value
    pub start: GenericValue,
    /// Clip end value
    pub end: GenericValue,
    /// Curve output for the clamped local time
    pub factor: f32,
}

impl ClipSample {
    /// Interpolated value
    pub fn value(&self) -> GenericValue {
        GenericValue::lerp(self.start, self.end, self.factor)
    }

    /// Whether the curve output is exactly at the end of the clip
    pub fn is_finished(&self) -> bool {
        self.factor == 1.0
    }
}

/// One timed interpolation segment of a track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    start_time: f32,
    end_time: f32,
    start_value: GenericValue,
    end_value: GenericValue,
    curve: Curve,
    /// Name attached to the clip-finished event
    finish_event: Option<String>,
}

impl Clip {
    /// Create a clip of [`MIN_INTERVAL`] length starting at `start_time`
    pub fn new(start_time: f32) -> Self {
        Self {
            id: ClipId::new(),
            start_time,
            end_time: start_time + MIN_INTERVAL,
            start_value: GenericValue::ZERO,
            end_value: GenericValue::ZERO,
            curve: Curve::linear(),
            finish_event: None,
        }
    }

    /// Set the end time (ignored if not after the start time)
    pub fn with_end_time(mut self, end_time: f32) -> Self {
        self.set_end_time(end_time);
        self
    }

    /// Set both values
    pub fn with_values(mut self, start: GenericValue, end: GenericValue) -> Self {
        self.start_value = start;
        self.end_value = end;
        self
    }

    /// Set the interpolation curve
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Name the clip-finished event
    pub fn with_finish_event(mut self, name: impl Into<String>) -> Self {
        self.finish_event = Some(name.into());
        self
    }

    /// Start time in seconds
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    /// End time in seconds
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    /// Clip length, always positive
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Value at the start of the clip
    pub fn start_value(&self) -> GenericValue {
        self.start_value
    }

    /// Value at the end of the clip
    pub fn end_value(&self) -> GenericValue {
        self.end_value
    }

    /// Interpolation curve
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Name attached to the clip-finished event
    pub fn finish_event(&self) -> Option<&str> {
        self.finish_event.as_deref()
    }

    /// Move the start time. Ignored unless `time < end_time`.
    pub fn set_start_time(&mut self, time: f32) {
        if time.is_nan() || time >= self.end_time {
            return;
        }
        self.start_time = time;
    }

    /// Move the end time. Ignored unless `time > start_time`.
    pub fn set_end_time(&mut self, time: f32) {
        if time.is_nan() || time <= self.start_time {
            return;
        }
        self.end_time = time;
    }

    /// Move the whole clip so it starts at `start_time`, keeping its length
    pub fn shift_to(&mut self, start_time: f32) {
        let duration = self.duration();
        // Order the two writes so neither one is rejected by the other bound
        if start_time > self.start_time {
            self.set_end_time(start_time + duration);
            self.set_start_time(start_time);
        } else {
            self.set_start_time(start_time);
            self.set_end_time(start_time + duration);
        }
    }

    /// Set the start value
    pub fn set_start_value(&mut self, value: GenericValue) {
        self.start_value = value;
    }

    /// Set the end value
    pub fn set_end_value(&mut self, value: GenericValue) {
        self.end_value = value;
    }

    /// Replace the interpolation curve
    pub fn set_curve(&mut self, curve: Curve) {
        self.curve = curve;
    }

    /// Name or clear the clip-finished event
    pub fn set_finish_event(&mut self, name: Option<String>) {
        self.finish_event = name;
    }

    /// Whether `time` lies within `[start_time, end_time]`
    pub fn contains(&self, time: f32) -> bool {
        self.start_time <= time && self.end_time >= time
    }

    /// Sample the clip at `time`, clamped into the clip
    pub fn sample(&self, time: f32) -> ClipSample {
        let time = time.max(self.start_time).min(self.end_time);
        let duration = self.duration();
        let local = if duration > 0.0 {
            (time - self.start_time) / duration
        } else {
            1.0
        };

        ClipSample {
            clip: self.id,
            start: self.start_value,
            end: self.end_value,
            factor: self.curve.evaluate(local),
        }
    }

    /// Interpolated value at `time`
    pub fn evaluate(&self, time: f32) -> GenericValue {
        self.sample(time).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Clip {
        Clip::new(1.0)
            .with_end_time(3.0)
            .with_values(GenericValue::new(0.0, 0.0, 0.0, 0.0), GenericValue::new(10.0, 20.0, 0.0, 1.0))
    }

    #[test]
    fn new_clip_has_minimal_length() {
        let clip = Clip::new(2.5);
        assert_eq!(clip.start_time(), 2.5);
        assert_eq!(clip.end_time(), 2.5 + MIN_INTERVAL);
        assert!(clip.duration() > 0.0);
    }

    #[test]
    fn rejects_start_at_or_after_end() {
        let mut clip = ramp();
        clip.set_start_time(3.0);
        assert_eq!(clip.start_time(), 1.0);
        clip.set_start_time(4.0);
        assert_eq!(clip.start_time(), 1.0);
        clip.set_start_time(f32::NAN);
        assert_eq!(clip.start_time(), 1.0);

        clip.set_start_time(2.0);
        assert_eq!(clip.start_time(), 2.0);
    }

    #[test]
    fn rejects_end_at_or_before_start() {
        let mut clip = ramp();
        clip.set_end_time(1.0);
        assert_eq!(clip.end_time(), 3.0);
        clip.set_end_time(0.0);
        assert_eq!(clip.end_time(), 3.0);

        clip.set_end_time(5.0);
        assert_eq!(clip.end_time(), 5.0);
    }

    #[test]
    fn sample_clamps_into_clip() {
        let clip = ramp();
        assert_eq!(clip.evaluate(0.0), clip.start_value());
        assert_eq!(clip.evaluate(9.0), clip.end_value());

        let mid = clip.evaluate(2.0);
        assert!((mid.x() - 5.0).abs() < 1e-5);
        assert!((mid.y() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn finished_only_at_factor_one() {
        let clip = ramp();
        assert!(!clip.sample(2.9).is_finished());
        assert!(clip.sample(3.0).is_finished());
        // Past the end clamps back onto the last frame
        assert!(clip.sample(10.0).is_finished());
    }

    #[test]
    fn shift_keeps_duration_in_both_directions() {
        let mut clip = ramp();
        clip.shift_to(7.0);
        assert_eq!(clip.start_time(), 7.0);
        assert_eq!(clip.end_time(), 9.0);

        clip.shift_to(0.5);
        assert_eq!(clip.start_time(), 0.5);
        assert_eq!(clip.end_time(), 2.5);
    }
}
