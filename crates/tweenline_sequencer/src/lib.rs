// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tween timeline for UI animation.
//!
//! This crate drives timed value interpolation on UI objects:
//! - Clips interpolating a packed four-component value along a curve
//! - Tracks of non-overlapping clips, one property each
//! - Groups binding tracks to a single target
//! - Animations with a forward/backward playback state machine
//! - An authoring session for scrubbing and clip edits
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - A [`TargetHost`] trait the engine implements to expose properties
//! - Property writers resolved once when a track is bound
//! - Curve evaluation for easing
//! - Playback events drained by the caller

pub mod animation;
pub mod authoring;
pub mod binding;
pub mod clip;
pub mod curve;
pub mod group;
pub mod host;
pub mod track;
pub mod value;

pub use animation::{
    Animation, AnimationFileError, PlayDirection, PlayMode, PlaybackEvent, PlaybackState, StopMode,
    WrapMode,
};
pub use authoring::{ClipRef, TimelineEditor};
pub use binding::{Capabilities, EntityId, PropertySlot, PropertyValue, PropertyWriter, TargetHost};
pub use clip::{Clip, ClipId, ClipSample, MIN_INTERVAL};
pub use curve::{Curve, CurveKey, Interpolation, InterpolationMode};
pub use group::{Group, GroupId};
pub use host::{MemoryHost, MemoryTarget, PropertyWrite};
pub use track::{FinishedClip, Track, TrackId, TrackKind};
pub use value::GenericValue;
