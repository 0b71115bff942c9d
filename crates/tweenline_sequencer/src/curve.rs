// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframed curves that shape how a clip moves from its start value to its
//! end value.

use serde::{Deserialize, Serialize};

/// Interpolation mode from a key to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum InterpolationMode {
    /// Constant (step)
    Constant,
    /// Linear interpolation
    Linear,
    /// Hermite spline driven by the key tangents
    #[default]
    Smooth,
}

/// A key on a [`Curve`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Normalized time of the key
    pub time: f32,
    /// Curve value at this key
    pub value: f32,
    /// Incoming slope
    pub in_tangent: f32,
    /// Outgoing slope
    pub out_tangent: f32,
    /// Interpolation mode to the next key
    pub interpolation: InterpolationMode,
}

impl CurveKey {
    /// Create a flat smooth key
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
            interpolation: InterpolationMode::Smooth,
        }
    }

    /// Set interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Set tangents for smooth interpolation
    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

/// A 1-D function of normalized time.
///
/// Outside its key range the curve holds the first or last key value, and an
/// empty curve evaluates to zero. Values are free to leave `0..=1`, which is
/// how overshoot and anticipation eases are expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Create a curve from keys in any order
    pub fn new(keys: Vec<CurveKey>) -> Self {
        let mut curve = Self { keys };
        curve.sort_keys();
        curve
    }

    /// Straight ramp from (0, 0) to (1, 1)
    pub fn linear() -> Self {
        Self::linear_between(0.0, 0.0, 1.0, 1.0)
    }

    /// Straight ramp between two points
    pub fn linear_between(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        let slope = if (time_end - time_start).abs() < f32::EPSILON {
            0.0
        } else {
            (value_end - value_start) / (time_end - time_start)
        };
        Self::new(vec![
            CurveKey::new(time_start, value_start)
                .with_tangents(slope, slope)
                .with_interpolation(InterpolationMode::Linear),
            CurveKey::new(time_end, value_end)
                .with_tangents(slope, slope)
                .with_interpolation(InterpolationMode::Linear),
        ])
    }

    /// Slow start, slow finish from (0, 0) to (1, 1)
    pub fn ease_in_out() -> Self {
        Self::new(vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)])
    }

    /// Flat curve
    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, value).with_interpolation(InterpolationMode::Constant)])
    }

    /// Add a key, keeping keys ordered by time
    pub fn add_key(&mut self, key: CurveKey) {
        self.keys.push(key);
        self.sort_keys();
    }

    /// Get all keys
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    fn sort_keys(&mut self) {
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Evaluate the curve at `time`
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // `time` is strictly inside the key range, so the index is at least 1
        let Some(next_idx) = self.keys.iter().position(|k| k.time >= time) else {
            return last.value;
        };
        let a = &self.keys[next_idx - 1];
        let b = &self.keys[next_idx];

        let span = b.time - a.time;
        if span < 0.0001 {
            return b.value;
        }
        let t = (time - a.time) / span;

        match a.interpolation {
            InterpolationMode::Constant => a.value,
            InterpolationMode::Linear => Interpolation::lerp(a.value, b.value, t),
            InterpolationMode::Smooth => {
                Interpolation::hermite(a.value, a.out_tangent * span, b.value, b.in_tangent * span, t)
            }
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::linear()
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Cubic bezier interpolation
    pub fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        p0 * mt3 + 3.0 * p1 * mt2 * t + 3.0 * p2 * mt * t2 + p3 * t3
    }

    /// Hermite spline interpolation
    pub fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
    }

    /// Cubic bezier through two control points, per component
    pub fn bezier_vec3(start: [f32; 3], control1: [f32; 3], control2: [f32; 3], end: [f32; 3], t: f32) -> [f32; 3] {
        [
            Self::bezier(start[0], control1[0], control2[0], end[0], t),
            Self::bezier(start[1], control1[1], control2[1], end[1], t),
            Self::bezier(start[2], control1[2], control2[2], end[2], t),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn linear_hits_both_ends_exactly() {
        let curve = Curve::linear();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
        assert!(approx(curve.evaluate(0.25), 0.25));
    }

    #[test]
    fn clamps_outside_key_range() {
        let curve = Curve::linear();
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(7.0), 1.0);
        assert_eq!(Curve::new(Vec::new()).evaluate(0.5), 0.0);
    }

    #[test]
    fn ease_in_out_is_symmetric_and_slow_at_edges() {
        let curve = Curve::ease_in_out();
        assert!(approx(curve.evaluate(0.5), 0.5));
        assert!(curve.evaluate(0.1) < 0.1);
        assert!(curve.evaluate(0.9) > 0.9);
    }

    #[test]
    fn constant_mode_steps() {
        let curve = Curve::new(vec![
            CurveKey::new(0.0, 0.2).with_interpolation(InterpolationMode::Constant),
            CurveKey::new(1.0, 0.8),
        ]);
        assert_eq!(curve.evaluate(0.99), 0.2);
        assert_eq!(curve.evaluate(1.0), 0.8);
    }

    #[test]
    fn overshoot_key_is_allowed() {
        let mut curve = Curve::ease_in_out();
        curve.add_key(CurveKey::new(0.7, 1.2));
        assert_eq!(curve.keys().len(), 3);
        assert!(approx(curve.evaluate(0.7), 1.2));
    }

    #[test]
    fn bezier_vec3_endpoints() {
        let start = [0.0, 0.0, 0.0];
        let end = [10.0, 0.0, 0.0];
        let c1 = [0.0, 5.0, 0.0];
        let c2 = [10.0, 5.0, 0.0];
        assert_eq!(Interpolation::bezier_vec3(start, c1, c2, end, 0.0), start);
        assert_eq!(Interpolation::bezier_vec3(start, c1, c2, end, 1.0), end);
        let mid = Interpolation::bezier_vec3(start, c1, c2, end, 0.5);
        assert!(approx(mid[0], 5.0));
        assert!(approx(mid[1], 3.75));
    }
}
