// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-width value stored at both ends of a clip.
//!
//! A [`GenericValue`] is four floats whose meaning is decided by the owning
//! track's [`TrackKind`](crate::track::TrackKind):
//! - `Active` reads component 0 (`> 0` means active)
//! - `Position`, `Rotation`, `Scale` read components 0..=2
//! - `Color` reads all four as RGBA
//! - `Alpha` reads component 3
//! - `Position2DBezier` packs the path endpoints in x/y and the two control
//!   points across the z/w components of the start and end values

use crate::curve::Interpolation;
use serde::{Deserialize, Serialize};

/// Four-component value shared by every track kind
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericValue(pub [f32; 4]);

impl GenericValue {
    /// All components zero
    pub const ZERO: Self = Self([0.0; 4]);

    /// Create a value from its four components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// Pack a 3D vector, leaving `w` at zero
    pub const fn from_vec3(v: [f32; 3]) -> Self {
        Self([v[0], v[1], v[2], 0.0])
    }

    /// Pack an active flag into component 0
    pub const fn from_bool(active: bool) -> Self {
        Self([if active { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0])
    }

    /// Pack an alpha value into component 3
    pub const fn from_alpha(alpha: f32) -> Self {
        Self([0.0, 0.0, 0.0, alpha])
    }

    /// First component
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    /// Second component
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    /// Third component
    pub fn z(&self) -> f32 {
        self.0[2]
    }

    /// Fourth component
    pub fn w(&self) -> f32 {
        self.0[3]
    }

    /// The first three components
    pub fn xyz(&self) -> [f32; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Component-wise linear interpolation. `t` is not clamped.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self([
            Interpolation::lerp(a.0[0], b.0[0], t),
            Interpolation::lerp(a.0[1], b.0[1], t),
            Interpolation::lerp(a.0[2], b.0[2], t),
            Interpolation::lerp(a.0[3], b.0[3], t),
        ])
    }
}

impl From<[f32; 4]> for GenericValue {
    fn from(v: [f32; 4]) -> Self {
        Self(v)
    }
}

impl From<[f32; 3]> for GenericValue {
    fn from(v: [f32; 3]) -> Self {
        Self::from_vec3(v)
    }
}
