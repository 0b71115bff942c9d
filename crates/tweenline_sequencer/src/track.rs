// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track definitions for the sequencer.
//!
//! A track animates one property of one target through an ordered list of
//! non-overlapping clips.

use crate::animation::StopMode;
use crate::binding::{Capabilities, EntityId, PropertyValue, PropertyWriter, TargetHost};
use crate::clip::{Clip, ClipId, ClipSample};
use crate::curve::Curve;
use crate::value::GenericValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Property animated by a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Active flag
    Active,
    /// Position (anchored for UI rects, local otherwise)
    Position,
    /// Local rotation from Euler angles
    Rotation,
    /// Local scale
    Scale,
    /// Graphic color
    Color,
    /// Canvas group or graphic alpha
    Alpha,
    /// Local position along a cubic bezier path
    Position2DBezier,
}

impl TrackKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Position => "Position",
            Self::Rotation => "Rotation",
            Self::Scale => "Scale",
            Self::Color => "Color",
            Self::Alpha => "Alpha",
            Self::Position2DBezier => "Position 2D Bezier",
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [TrackKind] {
        &[
            Self::Active,
            Self::Position,
            Self::Rotation,
            Self::Scale,
            Self::Color,
            Self::Alpha,
            Self::Position2DBezier,
        ]
    }

    /// Position and bezier position both drive the position of a target
    pub fn is_position_family(&self) -> bool {
        matches!(self, Self::Position | Self::Position2DBezier)
    }

    /// Whether a group may not hold both kinds at once
    pub fn conflicts_with(&self, other: TrackKind) -> bool {
        *self == other || (self.is_position_family() && other.is_position_family())
    }

    /// Whether a target with `capabilities` can be animated by this kind
    pub fn is_available(&self, capabilities: Capabilities) -> bool {
        match self {
            Self::Alpha => capabilities.has_alpha(),
            Self::Color => capabilities.graphic,
            _ => true,
        }
    }
}

/// A clip that reached the end of its curve during an evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedClip {
    /// Finished clip
    pub clip: ClipId,
    /// Event name attached to the clip
    pub event: Option<String>,
}

/// A track in the sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    kind: TrackKind,
    target: EntityId,
    clips: Vec<Clip>,
    #[serde(skip)]
    writer: PropertyWriter,
    /// Clip that produced a value on the previous playback pass
    #[serde(skip)]
    last_clip: Option<ClipId>,
}

impl Track {
    /// Create an unbound track. Call [`Track::bind`] before playing it.
    pub fn new(kind: TrackKind, target: EntityId) -> Self {
        Self {
            id: TrackId::new(),
            kind,
            target,
            clips: Vec::new(),
            writer: PropertyWriter::Unbound,
            last_clip: None,
        }
    }

    /// Property kind
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Bound target
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// Writer resolved at the last bind
    pub fn writer(&self) -> PropertyWriter {
        self.writer
    }

    /// Resolve the writer against the current target
    pub fn bind<H: TargetHost + ?Sized>(&mut self, host: &H) {
        self.writer = PropertyWriter::resolve(self.kind, host.capabilities(self.target));
    }

    /// Rebind to another target. Clips are left untouched.
    pub fn set_target<H: TargetHost + ?Sized>(&mut self, target: EntityId, host: &H) {
        self.target = target;
        self.bind(host);
    }

    /// Get all clips, ordered by start time
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Get clip count
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Whether the track has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Get clip by ID
    pub fn clip(&self, clip_id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Get mutable clip by ID
    pub(crate) fn clip_mut(&mut self, clip_id: ClipId) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// Move a clip's start, clamped to the previous clip's end
    pub fn set_clip_start_time(&mut self, clip_id: ClipId, time: f32) {
        if time.is_nan() {
            return;
        }
        let lower = self.prev_clip(clip_id).map_or(f32::NEG_INFINITY, Clip::end_time);
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.set_start_time(time.max(lower));
        }
    }

    /// Move a clip's end, clamped to the next clip's start
    pub fn set_clip_end_time(&mut self, clip_id: ClipId, time: f32) {
        if time.is_nan() {
            return;
        }
        let upper = self.next_clip(clip_id).map_or(f32::INFINITY, Clip::start_time);
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.set_end_time(time.min(upper));
        }
    }

    /// Move a clip to start at `start_time`, keeping its length and staying
    /// between its neighbours
    pub fn shift_clip(&mut self, clip_id: ClipId, start_time: f32) {
        if !start_time.is_finite() {
            return;
        }
        let lower = self.prev_clip(clip_id).map_or(f32::NEG_INFINITY, Clip::end_time);
        let upper = self.next_clip(clip_id).map_or(f32::INFINITY, Clip::start_time);
        if let Some(clip) = self.clip_mut(clip_id) {
            let start = start_time.min(upper - clip.duration()).max(lower);
            clip.shift_to(start);
        }
    }

    /// Set a clip's start and end values
    pub fn set_clip_values(&mut self, clip_id: ClipId, start: GenericValue, end: GenericValue) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.set_start_value(start);
            clip.set_end_value(end);
        }
    }

    /// Replace a clip's interpolation curve
    pub fn set_clip_curve(&mut self, clip_id: ClipId, curve: Curve) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.set_curve(curve);
        }
    }

    /// Name or clear a clip's finish event
    pub fn set_clip_finish_event(&mut self, clip_id: ClipId, name: Option<String>) {
        if let Some(clip) = self.clip_mut(clip_id) {
            clip.set_finish_event(name);
        }
    }

    /// Whether every clip has finite times with `start < end`, and clips are
    /// ordered without overlap
    pub fn is_well_formed(&self) -> bool {
        let clips_valid = self.clips.iter().all(|c| {
            c.start_time().is_finite() && c.end_time().is_finite() && c.start_time() < c.end_time()
        });
        clips_valid && self.clips.windows(2).all(|w| w[0].end_time() <= w[1].start_time())
    }

    /// Get the first clip containing `time`
    pub fn clip_at(&self, time: f32) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(time))
    }

    /// Get the clip ending at or before the start of `clip_id`
    pub fn prev_clip(&self, clip_id: ClipId) -> Option<&Clip> {
        let start = self.clip(clip_id)?.start_time();
        self.clips.iter().take_while(|c| c.end_time() <= start).last()
    }

    /// Get the clip starting at or after the end of `clip_id`
    pub fn next_clip(&self, clip_id: ClipId) -> Option<&Clip> {
        let end = self.clip(clip_id)?.end_time();
        self.clips.iter().find(|c| c.start_time() >= end)
    }

    /// End time of the last clip
    pub fn content_end(&self) -> f32 {
        self.clips.last().map(Clip::end_time).unwrap_or(0.0)
    }

    /// Whether `[start, end]` would overlap an existing clip
    fn overlaps(&self, start: f32, end: f32) -> bool {
        self.clips.iter().any(|c| start < c.end_time() && c.start_time() < end)
    }

    /// Add a prepared clip. Ignored if it overlaps an existing clip.
    pub fn add_clip(&mut self, clip: Clip) -> Option<ClipId> {
        if !clip.start_time().is_finite() || self.overlaps(clip.start_time(), clip.end_time()) {
            return None;
        }
        let id = clip.id;
        let index = self
            .clips
            .iter()
            .position(|c| c.start_time() >= clip.end_time())
            .unwrap_or(self.clips.len());
        self.clips.insert(index, clip);
        tracing::debug!(track = self.kind.name(), index, "clip added");
        Some(id)
    }

    /// Insert a minimal clip at `time`.
    ///
    /// The new clip starts from its predecessor's end value and ends on its
    /// successor's start value, falling back to [`Track::default_value`].
    /// Ignored if the clip would overlap an existing one.
    pub fn insert_clip<H: TargetHost + ?Sized>(&mut self, time: f32, host: &H) -> Option<ClipId> {
        if !time.is_finite() {
            return None;
        }

        let mut clip = Clip::new(time);
        if self.overlaps(clip.start_time(), clip.end_time()) {
            return None;
        }

        let prev_end = self
            .clips
            .iter()
            .take_while(|c| c.end_time() <= clip.start_time())
            .last()
            .map(Clip::end_value);
        let next_start = self
            .clips
            .iter()
            .find(|c| c.start_time() >= clip.end_time())
            .map(Clip::start_value);

        clip.set_start_value(prev_end.unwrap_or_else(|| self.default_value(host)));
        clip.set_end_value(next_start.unwrap_or_else(|| self.default_value(host)));
        self.add_clip(clip)
    }

    /// Remove the first clip containing `time`
    pub fn remove_clip_at(&mut self, time: f32) -> Option<Clip> {
        let id = self.clip_at(time)?.id;
        self.remove_clip(id)
    }

    /// Remove a clip
    pub fn remove_clip(&mut self, clip_id: ClipId) -> Option<Clip> {
        let index = self.clips.iter().position(|c| c.id == clip_id)?;
        if self.last_clip == Some(clip_id) {
            self.last_clip = None;
        }
        tracing::debug!(track = self.kind.name(), index, "clip removed");
        Some(self.clips.remove(index))
    }

    /// Value used for a new clip end with no neighbour to inherit from
    pub fn default_value<H: TargetHost + ?Sized>(&self, host: &H) -> GenericValue {
        let current = self.writer.slot().and_then(|slot| host.read(self.target, slot));

        match (self.kind, self.writer, current) {
            (TrackKind::Active, _, _) => GenericValue::from_bool(true),
            (TrackKind::Alpha, PropertyWriter::CanvasAlpha, Some(PropertyValue::Float(alpha))) => {
                GenericValue::from_alpha(alpha)
            }
            (TrackKind::Alpha, PropertyWriter::GraphicAlpha, Some(PropertyValue::Color(color))) => {
                GenericValue::from_alpha(color[3])
            }
            (TrackKind::Position2DBezier, _, Some(PropertyValue::Vec3(p))) => {
                GenericValue::new(p[0], p[1], 0.0, 0.0)
            }
            (TrackKind::Position | TrackKind::Rotation | TrackKind::Scale, _, Some(PropertyValue::Vec3(v))) => {
                GenericValue::from_vec3(v)
            }
            (TrackKind::Color, _, Some(PropertyValue::Color(c))) => GenericValue(c),
            _ => GenericValue::ZERO,
        }
    }

    /// Resolve the sample to apply at `time` during playback.
    ///
    /// When `time` falls in a gap right after a clip produced a value, that
    /// clip is evaluated one last time so the target lands on its boundary
    /// value instead of freezing mid-way.
    pub fn resolve(&mut self, time: f32) -> Option<ClipSample> {
        if let Some(clip) = self.clip_at(time) {
            let sample = clip.sample(time);
            self.last_clip = Some(sample.clip);
            return Some(sample);
        }

        let last = self.last_clip.take()?;
        self.clip(last).map(|clip| clip.sample(time))
    }

    /// Resolve the sample to show when scrubbing to `time`.
    ///
    /// Outside every clip, the clip with the closest boundary is used; on a
    /// tie the earlier clip wins.
    pub fn resolve_nearest(&self, time: f32) -> Option<ClipSample> {
        if let Some(clip) = self.clip_at(time) {
            return Some(clip.sample(time));
        }

        let distance = |c: &Clip| (time - c.start_time()).abs().min((time - c.end_time()).abs());
        let mut nearest: Option<(&Clip, f32)> = None;
        for clip in &self.clips {
            let d = distance(clip);
            match nearest {
                Some((_, best)) if d >= best => {}
                _ => nearest = Some((clip, d)),
            }
        }
        nearest.map(|(clip, _)| clip.sample(time))
    }

    /// Advance playback to `time` and write the result
    pub fn play<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H) -> Option<FinishedClip> {
        let sample = self.resolve(time)?;
        self.apply(&sample, host)
    }

    /// Scrub to `time` and write the result
    pub fn set_time<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H) -> Option<FinishedClip> {
        let sample = self.resolve_nearest(time)?;
        self.apply(&sample, host)
    }

    /// Write the frame matching a stop mode
    pub fn stop<H: TargetHost + ?Sized>(&mut self, mode: StopMode, host: &mut H) -> Option<FinishedClip> {
        let sample = match mode {
            StopMode::FirstFrame => self.clips.first()?.sample(0.0),
            StopMode::LastFrame => {
                let clip = self.clips.last()?;
                clip.sample(clip.end_time())
            }
            StopMode::Pause => return None,
        };
        self.apply(&sample, host)
    }

    fn apply<H: TargetHost + ?Sized>(&self, sample: &ClipSample, host: &mut H) -> Option<FinishedClip> {
        self.writer.apply(host, self.target, sample);

        sample.is_finished().then(|| FinishedClip {
            clip: sample.clip,
            event: self.clip(sample.clip).and_then(|c| c.finish_event().map(str::to_owned)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::PropertySlot;
    use crate::clip::MIN_INTERVAL;
    use crate::host::{MemoryHost, MemoryTarget};

    fn setup(kind: TrackKind) -> (MemoryHost, Track) {
        let mut host = MemoryHost::new();
        let id = host.spawn(
            MemoryTarget::new("Panel")
                .with_graphic([1.0, 1.0, 1.0, 0.8])
                .with_canvas_group(0.6),
        );
        let mut track = Track::new(kind, id);
        track.bind(&host);
        (host, track)
    }

    fn clip(start: f32, end: f32, from: f32, to: f32) -> Clip {
        Clip::new(start)
            .with_end_time(end)
            .with_values(GenericValue::new(from, 0.0, 0.0, 0.0), GenericValue::new(to, 0.0, 0.0, 0.0))
    }

    #[test]
    fn first_insert_gets_minimal_clip() {
        let (host, mut track) = setup(TrackKind::Scale);
        let id = track.insert_clip(2.0, &host).unwrap();

        let clip = track.clip(id).unwrap();
        assert_eq!(clip.start_time(), 2.0);
        assert_eq!(clip.end_time(), 2.0 + MIN_INTERVAL);
        // No neighbours: both ends take the live scale
        assert_eq!(clip.start_value(), GenericValue::from_vec3([1.0, 1.0, 1.0]));
        assert_eq!(clip.end_value(), GenericValue::from_vec3([1.0, 1.0, 1.0]));
    }

    #[test]
    fn insert_between_inherits_neighbour_values() {
        let (host, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 5.0)).unwrap();
        let b = track.add_clip(clip(2.0, 3.0, 8.0, 9.0)).unwrap();

        let c = track.insert_clip(1.5, &host).unwrap();

        let ids: Vec<ClipId> = track.clips().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, c, b]);
        let inserted = track.clip(c).unwrap();
        assert_eq!(inserted.start_value(), track.clip(a).unwrap().end_value());
        assert_eq!(inserted.end_value(), track.clip(b).unwrap().start_value());
    }

    #[test]
    fn insert_touching_neighbours_inherits_both() {
        let (host, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 5.0)).unwrap();
        let b = track.add_clip(clip(1.0 + MIN_INTERVAL, 2.0, 8.0, 9.0)).unwrap();

        let c = track.insert_clip(1.0, &host).unwrap();
        assert_eq!(track.prev_clip(c).map(|c| c.id), Some(a));
        assert_eq!(track.next_clip(c).map(|c| c.id), Some(b));
        assert_eq!(track.clip(c).unwrap().start_value().x(), 5.0);
        assert_eq!(track.clip(c).unwrap().end_value().x(), 8.0);
    }

    #[test]
    fn overlapping_insert_is_ignored() {
        let (host, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 1.0, 0.0, 1.0));

        assert!(track.insert_clip(0.5, &host).is_none());
        assert!(track.insert_clip(1.0 - MIN_INTERVAL / 2.0, &host).is_none());
        assert!(track.add_clip(clip(0.9, 2.0, 0.0, 1.0)).is_none());
        assert_eq!(track.clip_count(), 1);
    }

    #[test]
    fn default_values_per_kind() {
        let (host, active) = setup(TrackKind::Active);
        assert_eq!(active.default_value(&host), GenericValue::new(1.0, 0.0, 0.0, 0.0));

        let (host, alpha) = setup(TrackKind::Alpha);
        assert_eq!(alpha.writer(), PropertyWriter::CanvasAlpha);
        assert_eq!(alpha.default_value(&host), GenericValue::from_alpha(0.6));

        let (host, color) = setup(TrackKind::Color);
        assert_eq!(color.default_value(&host), GenericValue::new(1.0, 1.0, 1.0, 0.8));
    }

    #[test]
    fn remove_clip_at_time() {
        let (_, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 1.0, 0.0, 1.0));
        track.add_clip(clip(2.0, 3.0, 0.0, 1.0));

        assert!(track.remove_clip_at(1.5).is_none());
        assert_eq!(track.clip_count(), 2);
        assert!(track.remove_clip_at(2.5).is_some());
        assert_eq!(track.clip_count(), 1);
        assert_eq!(track.content_end(), 1.0);
    }

    #[test]
    fn resolve_is_stable_inside_a_clip() {
        let (_, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 2.0, 0.0, 10.0));

        let first = track.resolve(0.5);
        let second = track.resolve(0.5);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn gap_exit_snaps_to_last_clip_boundary_once() {
        let (_, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 10.0)).unwrap();

        assert!(track.resolve(0.5).is_some());

        let last = track.resolve(1.5).unwrap();
        assert_eq!(last.clip, a);
        assert_eq!(last.factor, 1.0);
        assert_eq!(last.value().x(), 10.0);

        assert!(track.resolve(1.5).is_none());
    }

    #[test]
    fn gap_without_previous_hit_resolves_nothing() {
        let (_, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(1.0, 2.0, 0.0, 10.0));
        assert!(track.resolve(0.5).is_none());
    }

    #[test]
    fn nearest_tie_prefers_first_clip() {
        let (_, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 10.0)).unwrap();
        track.add_clip(clip(2.0, 3.0, 20.0, 30.0));

        let sample = track.resolve_nearest(1.5).unwrap();
        assert_eq!(sample.clip, a);
        assert_eq!(sample.value().x(), 10.0);
    }

    #[test]
    fn nearest_picks_closest_boundary() {
        let (_, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 1.0, 0.0, 10.0));
        let b = track.add_clip(clip(2.0, 3.0, 20.0, 30.0)).unwrap();

        let sample = track.resolve_nearest(1.8).unwrap();
        assert_eq!(sample.clip, b);
        assert_eq!(sample.value().x(), 20.0);

        let after = track.resolve_nearest(7.0).unwrap();
        assert_eq!(after.clip, b);
        assert_eq!(after.value().x(), 30.0);
    }

    #[test]
    fn play_writes_and_reports_finish() {
        let (mut host, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 10.0).with_finish_event("slide_in")).unwrap();

        assert!(track.play(0.5, &mut host).is_none());
        let finished = track.play(1.0, &mut host).unwrap();
        assert_eq!(finished, FinishedClip { clip: a, event: Some("slide_in".into()) });

        // Parked at the end the notification fires again
        assert!(track.set_time(1.0, &mut host).is_some());

        let target = host.target(track.target()).unwrap();
        assert_eq!(target.position, [10.0, 0.0, 0.0]);
    }

    #[test]
    fn stop_applies_first_or_last_frame() {
        let (mut host, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.5, 1.0, 3.0, 4.0));
        track.add_clip(clip(2.0, 3.0, 7.0, 9.0));

        track.stop(StopMode::FirstFrame, &mut host);
        assert_eq!(host.target(track.target()).unwrap().position[0], 3.0);

        track.stop(StopMode::LastFrame, &mut host);
        assert_eq!(host.target(track.target()).unwrap().position[0], 9.0);

        host.take_writes();
        track.stop(StopMode::Pause, &mut host);
        assert!(host.writes().is_empty());
    }

    #[test]
    fn clip_time_setters_stop_at_neighbours() {
        let (_, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 1.0)).unwrap();
        let b = track.add_clip(clip(1.5, 2.0, 0.0, 1.0)).unwrap();
        let c = track.add_clip(clip(3.0, 3.5, 0.0, 1.0)).unwrap();

        track.set_clip_end_time(a, 1.8);
        assert_eq!(track.clip(a).unwrap().end_time(), 1.5);

        track.set_clip_start_time(c, 0.5);
        assert_eq!(track.clip(c).unwrap().start_time(), 2.0);

        // Start past its own end is still rejected
        track.set_clip_start_time(b, 2.5);
        assert_eq!(track.clip(b).unwrap().start_time(), 1.5);

        track.set_clip_end_time(a, f32::NAN);
        assert_eq!(track.clip(a).unwrap().end_time(), 1.5);
        assert!(track.is_well_formed());
    }

    #[test]
    fn shift_clip_keeps_length_between_neighbours() {
        let (_, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 1.0, 0.0, 1.0));
        let b = track.add_clip(clip(1.5, 2.0, 0.0, 1.0)).unwrap();
        track.add_clip(clip(3.0, 3.5, 0.0, 1.0));

        track.shift_clip(b, 2.8);
        let moved = track.clip(b).unwrap();
        assert_eq!((moved.start_time(), moved.end_time()), (2.5, 3.0));

        track.shift_clip(b, -4.0);
        let moved = track.clip(b).unwrap();
        assert_eq!((moved.start_time(), moved.end_time()), (1.0, 1.5));
        assert!(track.is_well_formed());
    }

    #[test]
    fn clip_value_setters_go_through_track() {
        let (_, mut track) = setup(TrackKind::Position);
        let a = track.add_clip(clip(0.0, 1.0, 0.0, 1.0)).unwrap();

        track.set_clip_values(a, GenericValue::new(2.0, 0.0, 0.0, 0.0), GenericValue::new(4.0, 0.0, 0.0, 0.0));
        track.set_clip_curve(a, Curve::constant(1.0));
        track.set_clip_finish_event(a, Some("done".into()));

        let edited = track.clip(a).unwrap();
        assert_eq!(edited.evaluate(0.0).x(), 4.0);
        assert_eq!(edited.finish_event(), Some("done"));
    }

    #[test]
    fn rebinding_keeps_clips() {
        let (mut host, mut track) = setup(TrackKind::Position);
        track.add_clip(clip(0.0, 1.0, 0.0, 1.0));

        let rect = host.spawn(MemoryTarget::new("Rect").with_rect_transform());
        track.set_target(rect, &host);

        assert_eq!(track.clip_count(), 1);
        assert_eq!(track.writer().slot(), Some(PropertySlot::AnchoredPosition));
    }

    #[test]
    fn availability_depends_on_components() {
        let none = Capabilities::default();
        let graphic = Capabilities { graphic: true, ..Default::default() };
        let canvas = Capabilities { canvas_group: true, ..Default::default() };

        assert!(!TrackKind::Alpha.is_available(none));
        assert!(TrackKind::Alpha.is_available(canvas));
        assert!(!TrackKind::Color.is_available(canvas));
        assert!(TrackKind::Color.is_available(graphic));
        assert!(TrackKind::all().iter().filter(|k| k.is_available(none)).count() == 5);
        assert!(TrackKind::Position.conflicts_with(TrackKind::Position2DBezier));
        assert!(!TrackKind::Position.conflicts_with(TrackKind::Scale));
    }
}
