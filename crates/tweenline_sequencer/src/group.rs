// SPDX-License-Identifier: MIT OR Apache-2.0
//! Groups of tracks bound to a single target.

use crate::animation::{PlaybackEvent, StopMode};
use crate::binding::{EntityId, TargetHost};
use crate::track::{FinishedClip, Track, TrackId, TrackKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Create a new random group ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

/// Named set of tracks animating one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group ID
    pub id: GroupId,
    /// Group name
    pub name: String,
    /// Whether authoring edits are blocked
    pub locked: bool,
    target: Option<EntityId>,
    tracks: IndexMap<TrackId, Track>,
}

impl Group {
    /// Create a new group
    pub fn new(name: impl Into<String>, target: Option<EntityId>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            locked: false,
            target,
            tracks: IndexMap::new(),
        }
    }

    /// Bound target
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Rebind the group and every track to `target`
    pub fn set_target<H: TargetHost + ?Sized>(&mut self, target: EntityId, host: &H) {
        self.target = Some(target);
        for track in self.tracks.values_mut() {
            track.set_target(target, host);
        }
    }

    /// Re-resolve track writers, e.g. after loading
    pub fn bind<H: TargetHost + ?Sized>(&mut self, host: &H) {
        for track in self.tracks.values_mut() {
            track.bind(host);
        }
    }

    /// Whether a track conflicting with `kind` exists
    pub fn contains_kind(&self, kind: TrackKind) -> bool {
        self.tracks.values().any(|t| t.kind().conflicts_with(kind))
    }

    /// Kinds that could still be added
    pub fn available_kinds<H: TargetHost + ?Sized>(&self, host: &H) -> Vec<TrackKind> {
        let Some(target) = self.target else {
            return Vec::new();
        };
        let capabilities = host.capabilities(target);
        TrackKind::all()
            .iter()
            .copied()
            .filter(|kind| !self.contains_kind(*kind) && kind.is_available(capabilities))
            .collect()
    }

    /// Add a track.
    ///
    /// Ignored when the group has no target, already holds the kind (position
    /// and bezier position exclude each other) or the target cannot carry it.
    pub fn add_track<H: TargetHost + ?Sized>(&mut self, kind: TrackKind, host: &H) -> Option<TrackId> {
        let target = self.target?;
        if self.contains_kind(kind) || !kind.is_available(host.capabilities(target)) {
            return None;
        }

        let mut track = Track::new(kind, target);
        track.bind(host);
        let id = track.id;
        self.tracks.insert(id, track);
        tracing::debug!(group = %self.name, kind = kind.name(), "track added");
        Some(id)
    }

    /// Remove the track of a kind
    pub fn remove_track(&mut self, kind: TrackKind) -> Option<Track> {
        let id = self.track_by_kind(kind)?.id;
        self.remove_track_by_id(id)
    }

    /// Remove a track
    pub fn remove_track_by_id(&mut self, track_id: TrackId) -> Option<Track> {
        self.tracks.shift_remove(&track_id)
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Get a mutable track
    pub fn track_mut(&mut self, track_id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&track_id)
    }

    /// Get the track of a kind
    pub fn track_by_kind(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.values().find(|t| t.kind() == kind)
    }

    /// Get the mutable track of a kind
    pub fn track_by_kind_mut(&mut self, kind: TrackKind) -> Option<&mut Track> {
        self.tracks.values_mut().find(|t| t.kind() == kind)
    }

    /// Get all tracks
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Latest clip end across all tracks
    pub fn content_end(&self) -> f32 {
        self.tracks.values().map(Track::content_end).fold(0.0, f32::max)
    }

    /// Advance every track to `time`
    pub fn play<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H, events: &mut Vec<PlaybackEvent>) {
        for track in self.tracks.values_mut() {
            let finished = track.play(time, host);
            Self::push_finished(self.id, track.id, finished, events);
        }
    }

    /// Apply the stop frame on every track
    pub fn stop<H: TargetHost + ?Sized>(&mut self, mode: StopMode, host: &mut H, events: &mut Vec<PlaybackEvent>) {
        for track in self.tracks.values_mut() {
            let finished = track.stop(mode, host);
            Self::push_finished(self.id, track.id, finished, events);
        }
    }

    /// Scrub every track to `time`
    pub fn set_time<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H, events: &mut Vec<PlaybackEvent>) {
        for track in self.tracks.values_mut() {
            let finished = track.set_time(time, host);
            Self::push_finished(self.id, track.id, finished, events);
        }
    }

    fn push_finished(
        group: GroupId,
        track: TrackId,
        finished: Option<FinishedClip>,
        events: &mut Vec<PlaybackEvent>,
    ) {
        if let Some(FinishedClip { clip, event }) = finished {
            events.push(PlaybackEvent::ClipFinished { group, track, clip, event });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::PropertySlot;
    use crate::clip::Clip;
    use crate::host::{MemoryHost, MemoryTarget};
    use crate::value::GenericValue;

    fn setup() -> (MemoryHost, Group) {
        let mut host = MemoryHost::new();
        let id = host.spawn(MemoryTarget::new("Icon").with_graphic([1.0; 4]));
        (host, Group::new("Icon", Some(id)))
    }

    #[test]
    fn position_family_is_exclusive() {
        let (host, mut group) = setup();
        assert!(group.add_track(TrackKind::Position2DBezier, &host).is_some());
        assert!(group.add_track(TrackKind::Position, &host).is_none());
        assert!(group.add_track(TrackKind::Position2DBezier, &host).is_none());
        assert_eq!(group.track_count(), 1);

        group.remove_track(TrackKind::Position2DBezier);
        assert!(group.add_track(TrackKind::Position, &host).is_some());
    }

    #[test]
    fn duplicate_and_unavailable_kinds_are_ignored() {
        let (host, mut group) = setup();
        assert!(group.add_track(TrackKind::Scale, &host).is_some());
        assert!(group.add_track(TrackKind::Scale, &host).is_none());
        // Graphic present, so alpha goes through the graphic color
        assert!(group.add_track(TrackKind::Alpha, &host).is_some());

        let mut plain = Group::new("Plain", Some(EntityId::new()));
        assert!(plain.add_track(TrackKind::Color, &host).is_none());
        assert!(Group::new("Empty", None).add_track(TrackKind::Scale, &host).is_none());
    }

    #[test]
    fn available_kinds_excludes_present_ones() {
        let (host, mut group) = setup();
        group.add_track(TrackKind::Position, &host);

        let kinds = group.available_kinds(&host);
        assert!(!kinds.contains(&TrackKind::Position));
        assert!(!kinds.contains(&TrackKind::Position2DBezier));
        assert!(kinds.contains(&TrackKind::Color));
    }

    #[test]
    fn set_target_rebinds_tracks() {
        let (mut host, mut group) = setup();
        let track_id = group.add_track(TrackKind::Position, &host).unwrap();
        group
            .track_mut(track_id)
            .unwrap()
            .add_clip(Clip::new(0.0).with_end_time(1.0));

        let other = host.spawn(MemoryTarget::new("Rect").with_rect_transform());
        group.set_target(other, &host);

        let track = group.track(track_id).unwrap();
        assert_eq!(track.target(), other);
        assert_eq!(track.clip_count(), 1);
        assert_eq!(track.writer().slot(), Some(PropertySlot::AnchoredPosition));
    }

    #[test]
    fn play_reports_finished_clips_with_ids() {
        let (mut host, mut group) = setup();
        let track_id = group.add_track(TrackKind::Scale, &host).unwrap();
        let clip_id = group
            .track_mut(track_id)
            .unwrap()
            .add_clip(
                Clip::new(0.0)
                    .with_end_time(1.0)
                    .with_values(GenericValue::from_vec3([1.0; 3]), GenericValue::from_vec3([2.0; 3])),
            )
            .unwrap();

        let mut events = Vec::new();
        group.play(0.5, &mut host, &mut events);
        assert!(events.is_empty());

        group.play(1.0, &mut host, &mut events);
        assert_eq!(
            events,
            vec![PlaybackEvent::ClipFinished { group: group.id, track: track_id, clip: clip_id, event: None }]
        );
    }
}
