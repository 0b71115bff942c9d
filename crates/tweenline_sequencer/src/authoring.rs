// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authoring session state.
//!
//! [`TimelineEditor`] is the context an editing tool passes around to
//! coordinate selection, scrubbing and clip edits with playback. Selection is
//! held as a [`ClipRef`] of stable IDs, so removing a clip never leaves a
//! dangling reference; stale references simply resolve to `None`.

use crate::animation::{Animation, PlayMode, StopMode};
use crate::binding::TargetHost;
use crate::clip::{Clip, ClipId};
use crate::group::GroupId;
use crate::track::{Track, TrackId};
use std::time::Instant;

/// Stable identity of a clip inside an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipRef {
    /// Owning group
    pub group: GroupId,
    /// Owning track
    pub track: TrackId,
    /// The clip
    pub clip: ClipId,
}

impl ClipRef {
    /// Create a new clip reference
    pub fn new(group: GroupId, track: TrackId, clip: ClipId) -> Self {
        Self { group, track, clip }
    }

    /// Look the clip up
    pub fn resolve<'a>(&self, anim: &'a Animation) -> Option<&'a Clip> {
        anim.track(self.group, self.track)?.clip(self.clip)
    }
}

/// Editing session for one animation
#[derive(Debug, Default)]
pub struct TimelineEditor {
    selection: Option<ClipRef>,
    last_poll: Option<Instant>,
}

impl TimelineEditor {
    /// Create an editor with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an editing session, pausing playback in place
    pub fn open<H: TargetHost + ?Sized>(anim: &mut Animation, host: &mut H) -> Self {
        anim.stop(StopMode::Pause, host);
        Self::new()
    }

    // Selection

    /// Select a clip
    pub fn select(&mut self, clip: ClipRef) {
        self.selection = Some(clip);
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Selected reference, even if stale
    pub fn selection(&self) -> Option<ClipRef> {
        self.selection
    }

    /// Selected clip, if it still exists
    pub fn selected_clip<'a>(&self, anim: &'a Animation) -> Option<&'a Clip> {
        self.selection?.resolve(anim)
    }

    /// Whether `clip` is the selected one
    pub fn is_selected(&self, clip: ClipRef) -> bool {
        self.selection == Some(clip)
    }

    /// Drop the selection if its clip no longer exists
    pub fn prune_selection(&mut self, anim: &Animation) {
        if self.selected_clip(anim).is_none() {
            self.selection = None;
        }
    }

    // Playback

    /// Move the playhead, pausing playback first
    pub fn scrub<H: TargetHost + ?Sized>(&mut self, anim: &mut Animation, time: f32, host: &mut H) {
        if anim.is_playing() {
            anim.stop(StopMode::Pause, host);
        }
        anim.set_time_direct(time, host);
    }

    /// Start playback and restart the poll clock
    pub fn play<H: TargetHost + ?Sized>(&mut self, anim: &mut Animation, mode: PlayMode, host: &mut H) {
        self.last_poll = None;
        anim.play(mode, host);
    }

    /// Advance the animation by the real time elapsed since the last poll.
    ///
    /// The first poll only starts the clock.
    pub fn poll<H: TargetHost + ?Sized>(&mut self, anim: &mut Animation, host: &mut H, now: Instant) {
        let last = self.last_poll.replace(now);
        if let Some(last) = last {
            let delta = now.saturating_duration_since(last).as_secs_f32();
            anim.tick(delta, host);
        }
    }

    // Clip edits

    /// Insert a clip at `time` and select it
    pub fn insert_clip<H: TargetHost + ?Sized>(
        &mut self,
        anim: &mut Animation,
        group: GroupId,
        track: TrackId,
        time: f32,
        host: &H,
    ) -> Option<ClipRef> {
        let clip = editable_track(anim, group, track)?.insert_clip(time, host)?;
        let clip_ref = ClipRef::new(group, track, clip);
        tracing::debug!(?time, "clip inserted");
        self.selection = Some(clip_ref);
        Some(clip_ref)
    }

    /// Remove a clip, clearing the selection if it pointed there
    pub fn remove_clip(&mut self, anim: &mut Animation, clip: ClipRef) -> Option<Clip> {
        let removed = editable_track(anim, clip.group, clip.track)?.remove_clip(clip.clip)?;
        if self.is_selected(clip) {
            self.selection = None;
        }
        tracing::debug!(start = removed.start_time(), "clip removed");
        Some(removed)
    }

    /// Move a clip by `offset` seconds keeping its length.
    ///
    /// The clip stops at the previous clip's end (or 0) and at the next
    /// clip's start (or the animation duration).
    pub fn drag_clip(&mut self, anim: &mut Animation, clip: ClipRef, offset: f32) {
        let duration = anim.duration();
        let Some(track) = editable_track(anim, clip.group, clip.track) else {
            return;
        };
        let Some(current) = track.clip(clip.clip) else {
            return;
        };

        let length = current.duration();
        let lower = track.prev_clip(clip.clip).map_or(0.0, Clip::end_time);
        let upper = track.next_clip(clip.clip).map_or(duration, Clip::start_time);

        let start = if offset < 0.0 {
            (current.start_time() + offset).max(lower)
        } else {
            // A clip already past the end must not move left
            ((current.end_time() + offset).min(upper) - length).max(current.start_time())
        };

        track.shift_clip(clip.clip, start.max(lower));
    }

    /// Snap the clip's start to the previous clip's end
    pub fn link_prev(&mut self, anim: &mut Animation, clip: ClipRef) {
        let Some(track) = editable_track(anim, clip.group, clip.track) else {
            return;
        };
        let Some(prev_end) = track.prev_clip(clip.clip).map(Clip::end_time) else {
            return;
        };
        track.set_clip_start_time(clip.clip, prev_end);
    }

    /// Snap the clip's end to the next clip's start
    pub fn link_next(&mut self, anim: &mut Animation, clip: ClipRef) {
        let Some(track) = editable_track(anim, clip.group, clip.track) else {
            return;
        };
        let Some(next_start) = track.next_clip(clip.clip).map(Clip::start_time) else {
            return;
        };
        track.set_clip_end_time(clip.clip, next_start);
    }
}

/// Track inside an unlocked group
fn editable_track(anim: &mut Animation, group: GroupId, track: TrackId) -> Option<&mut Track> {
    let group = anim.group_mut(group)?;
    if group.locked {
        return None;
    }
    group.track_mut(track)
}
