// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation containing groups, and its playback state machine.
//!
//! The animation owns the whole group/track/clip graph and a single current
//! time. Each [`Animation::tick`] first writes every track at the current
//! time, then either finishes playback (applying the wrap mode) or advances
//! the time by the scaled delta, clamped to `[0, duration]`.

use crate::binding::{EntityId, TargetHost};
use crate::clip::ClipId;
use crate::group::{Group, GroupId};
use crate::track::{Track, TrackId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current animation file format version
pub const ANIMATION_FORMAT_VERSION: u32 = 1;

/// How playback starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Forward from the first frame
    #[default]
    Forward,
    /// Forward from the current time
    ForwardCurrentAt,
    /// Backward from the last frame
    Backward,
    /// Backward from the current time
    BackwardCurrentAt,
}

impl PlayMode {
    /// Direction this mode plays in
    pub fn direction(&self) -> PlayDirection {
        match self {
            Self::Forward | Self::ForwardCurrentAt => PlayDirection::Forward,
            Self::Backward | Self::BackwardCurrentAt => PlayDirection::Backward,
        }
    }
}

/// Direction of time while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayDirection {
    /// Time increases
    #[default]
    Forward,
    /// Time decreases
    Backward,
}

impl PlayDirection {
    /// The other direction
    pub fn opposite(&self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Play mode restarting from the matching end
    pub fn restart_mode(&self) -> PlayMode {
        match self {
            Self::Forward => PlayMode::Forward,
            Self::Backward => PlayMode::Backward,
        }
    }
}

/// Frame shown when playback stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopMode {
    /// Jump to the last frame
    LastFrame,
    /// Keep the current frame
    #[default]
    Pause,
    /// Jump to the first frame
    FirstFrame,
}

/// What happens when playback reaches an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Stop
    #[default]
    Once,
    /// Restart with the animation's play mode
    Loop,
    /// Play back the other way
    PingPong,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing
    #[default]
    Idle,
    /// Playing forward
    PlayingForward,
    /// Playing backward
    PlayingBackward,
}

/// Notification produced while playing or scrubbing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A clip was evaluated at the very end of its curve
    ClipFinished {
        /// Owning group
        group: GroupId,
        /// Owning track
        track: TrackId,
        /// Finished clip
        clip: ClipId,
        /// Event name attached to the clip
        event: Option<String>,
    },
    /// Playback reached an end
    Finished {
        /// Direction that just finished
        direction: PlayDirection,
    },
}

/// Animation file errors
#[derive(Debug, Error)]
pub enum AnimationFileError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Animation could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] ron::Error),

    /// File was written by a newer version
    #[error("Animation version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Newest supported version
        supported: u32,
    },

    /// A track holds empty, unordered or overlapping clips
    #[error("Track {track} in group '{group}' has empty, unordered or overlapping clips")]
    InvalidTrack {
        /// Owning group name
        group: String,
        /// Track kind name
        track: &'static str,
    },
}

fn default_time_scale() -> f32 {
    1.0
}

fn default_version() -> u32 {
    ANIMATION_FORMAT_VERSION
}

/// A timeline of groups with a playback head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Animation name
    pub name: String,
    groups: IndexMap<GroupId, Group>,
    duration: f32,
    /// Mode used by [`Animation::start`] and when looping
    pub play_mode: PlayMode,
    /// Behavior at either end
    pub wrap_mode: WrapMode,
    /// Start playing from [`Animation::start`]
    pub auto_play: bool,
    /// Multiplier applied to every tick delta
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    #[serde(skip)]
    current_time: f32,
    #[serde(skip)]
    is_playing: bool,
    #[serde(skip)]
    direction: PlayDirection,
    #[serde(skip)]
    pending_events: Vec<PlaybackEvent>,
}

impl Animation {
    /// Create a new one second animation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: ANIMATION_FORMAT_VERSION,
            name: name.into(),
            groups: IndexMap::new(),
            duration: 1.0,
            play_mode: PlayMode::Forward,
            wrap_mode: WrapMode::Once,
            auto_play: false,
            time_scale: 1.0,
            current_time: 0.0,
            is_playing: false,
            direction: PlayDirection::Forward,
            pending_events: Vec::new(),
        }
    }

    /// Total length in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Set the length. Negative values become zero.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = if duration.is_nan() { 0.0 } else { duration.max(0.0) };
        self.current_time = self.current_time.min(self.duration);
    }

    /// Latest clip end across all groups
    pub fn content_duration(&self) -> f32 {
        self.groups.values().map(Group::content_end).fold(0.0, f32::max)
    }

    /// Playback head in seconds
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Direction of the current or last playback
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        match (self.is_playing, self.direction) {
            (false, _) => PlaybackState::Idle,
            (true, PlayDirection::Forward) => PlaybackState::PlayingForward,
            (true, PlayDirection::Backward) => PlaybackState::PlayingBackward,
        }
    }

    // Group management

    /// Add a group for `target`
    pub fn add_group(&mut self, name: impl Into<String>, target: Option<EntityId>) -> GroupId {
        let group = Group::new(name, target);
        let id = group.id;
        tracing::debug!(animation = %self.name, group = %group.name, "group added");
        self.groups.insert(id, group);
        id
    }

    /// Remove a group
    pub fn remove_group(&mut self, group_id: GroupId) -> Option<Group> {
        self.groups.shift_remove(&group_id)
    }

    /// Get a group
    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.get(&group_id)
    }

    /// Get a mutable group
    pub fn group_mut(&mut self, group_id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&group_id)
    }

    /// Get the group bound to `target`
    pub fn group_for_target(&self, target: EntityId) -> Option<&Group> {
        self.groups.values().find(|g| g.target() == Some(target))
    }

    /// Whether any group is bound to `target`
    pub fn contains_target(&self, target: EntityId) -> bool {
        self.group_for_target(target).is_some()
    }

    /// Get all groups
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Get group count
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Get a track inside a group
    pub fn track(&self, group_id: GroupId, track_id: TrackId) -> Option<&Track> {
        self.groups.get(&group_id)?.track(track_id)
    }

    /// Get a mutable track inside a group
    pub fn track_mut(&mut self, group_id: GroupId, track_id: TrackId) -> Option<&mut Track> {
        self.groups.get_mut(&group_id)?.track_mut(track_id)
    }

    /// Re-resolve every track writer against the host
    pub fn bind<H: TargetHost + ?Sized>(&mut self, host: &H) {
        for group in self.groups.values_mut() {
            group.bind(host);
        }
    }

    // Playback

    /// Play if [`Animation::auto_play`] is set
    pub fn start<H: TargetHost + ?Sized>(&mut self, host: &mut H) {
        if self.auto_play {
            self.play(self.play_mode, host);
        }
    }

    /// Start playing
    pub fn play<H: TargetHost + ?Sized>(&mut self, mode: PlayMode, host: &mut H) {
        match mode {
            PlayMode::Forward => self.current_time = 0.0,
            PlayMode::Backward => self.current_time = self.duration,
            PlayMode::ForwardCurrentAt | PlayMode::BackwardCurrentAt => {}
        }
        self.direction = mode.direction();
        self.apply_scrub(host);
        self.is_playing = true;
        tracing::info!(animation = %self.name, ?mode, time = self.current_time, "playback started");
    }

    /// Start playing from `time`
    pub fn play_at<H: TargetHost + ?Sized>(&mut self, mode: PlayMode, time: f32, host: &mut H) {
        self.current_time = time.max(0.0).min(self.duration);
        self.play(
            match mode.direction() {
                PlayDirection::Forward => PlayMode::ForwardCurrentAt,
                PlayDirection::Backward => PlayMode::BackwardCurrentAt,
            },
            host,
        );
    }

    /// Stop playing and show the frame matching `mode`
    pub fn stop<H: TargetHost + ?Sized>(&mut self, mode: StopMode, host: &mut H) {
        self.is_playing = false;

        for group in self.groups.values_mut() {
            group.stop(mode, host, &mut self.pending_events);
        }

        match mode {
            StopMode::LastFrame => self.current_time = self.duration,
            StopMode::FirstFrame => self.current_time = 0.0,
            StopMode::Pause => {}
        }
        tracing::info!(animation = %self.name, ?mode, time = self.current_time, "playback stopped");
    }

    /// Update playback with delta time
    pub fn tick<H: TargetHost + ?Sized>(&mut self, delta_time: f32, host: &mut H) {
        if !self.is_playing {
            return;
        }

        let delta = delta_time * self.time_scale;
        tracing::trace!(time = self.current_time, delta, "tick");

        // Values for this frame are written before the head moves
        for group in self.groups.values_mut() {
            group.play(self.current_time, host, &mut self.pending_events);
        }

        match self.direction {
            PlayDirection::Forward if self.current_time >= self.duration => {
                self.finish(PlayDirection::Forward, host);
            }
            PlayDirection::Backward if self.current_time <= 0.0 => {
                self.finish(PlayDirection::Backward, host);
            }
            PlayDirection::Forward => {
                self.current_time = (self.current_time + delta).max(0.0).min(self.duration);
            }
            PlayDirection::Backward => {
                self.current_time = (self.current_time - delta).max(0.0).min(self.duration);
            }
        }
    }

    fn finish<H: TargetHost + ?Sized>(&mut self, direction: PlayDirection, host: &mut H) {
        self.stop(
            match direction {
                PlayDirection::Forward => StopMode::LastFrame,
                PlayDirection::Backward => StopMode::FirstFrame,
            },
            host,
        );
        self.pending_events.push(PlaybackEvent::Finished { direction });
        tracing::info!(animation = %self.name, ?direction, wrap = ?self.wrap_mode, "playback finished");

        match self.wrap_mode {
            WrapMode::Once => {}
            WrapMode::Loop => self.play(self.play_mode, host),
            WrapMode::PingPong => self.play(direction.opposite().restart_mode(), host),
        }
    }

    /// Move the head to `time` and write every track, without touching the
    /// playing state
    pub fn set_time_direct<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H) {
        self.current_time = time;
        self.apply_scrub(host);
    }

    /// Move the head to the first frame
    pub fn rewind<H: TargetHost + ?Sized>(&mut self, host: &mut H) {
        self.set_time_direct(0.0, host);
    }

    /// Write every track at `time` without moving the head
    pub fn sample<H: TargetHost + ?Sized>(&mut self, time: f32, host: &mut H) {
        for group in self.groups.values_mut() {
            group.set_time(time, host, &mut self.pending_events);
        }
    }

    fn apply_scrub<H: TargetHost + ?Sized>(&mut self, host: &mut H) {
        let time = self.current_time;
        self.sample(time, host);
    }

    /// Events collected since the last call
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Events collected so far
    pub fn pending_events(&self) -> &[PlaybackEvent] {
        &self.pending_events
    }

    // Persistence

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON format. Track writers start unbound; call
    /// [`Animation::bind`] before playing.
    pub fn from_ron(s: &str) -> Result<Self, AnimationFileError> {
        let mut animation: Animation = ron::from_str(s)?;
        if animation.version > ANIMATION_FORMAT_VERSION {
            return Err(AnimationFileError::UnsupportedVersion {
                found: animation.version,
                supported: ANIMATION_FORMAT_VERSION,
            });
        }
        for group in animation.groups.values() {
            if let Some(track) = group.tracks().find(|t| !t.is_well_formed()) {
                return Err(AnimationFileError::InvalidTrack {
                    group: group.name.clone(),
                    track: track.kind().name(),
                });
            }
        }

        let duration = animation.duration;
        animation.set_duration(duration);
        Ok(animation)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), AnimationFileError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, AnimationFileError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new("Untitled Animation")
    }
}
