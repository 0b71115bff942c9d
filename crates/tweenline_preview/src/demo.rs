// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sample scene and animation for trying the preview.

use crate::error::PreviewResult;
use std::path::{Path, PathBuf};
use tweenline_sequencer::{
    Animation, Clip, Curve, GenericValue, MemoryHost, MemoryTarget, TrackKind, WrapMode,
};

/// Animation file name written by [`write_demo`]
pub const DEMO_ANIMATION_FILE: &str = "intro.anim.ron";

/// Scene file name written by [`write_demo`]
pub const DEMO_SCENE_FILE: &str = "intro.scene.ron";

/// Build a small menu intro: a title sliding in and fading up, a button
/// popping, a coin flying along a curve and a badge switching on.
pub fn build() -> (MemoryHost, Animation) {
    let mut host = MemoryHost::new();
    let title = host.spawn(
        MemoryTarget::new("Title")
            .with_rect_transform()
            .with_graphic([1.0, 1.0, 1.0, 0.0]),
    );
    let button = host.spawn(MemoryTarget::new("PlayButton").with_rect_transform().with_canvas_group(1.0));
    let coin = host.spawn(MemoryTarget::new("Coin"));
    let badge = host.spawn(MemoryTarget::new("NewBadge"));

    let mut animation = Animation::new("Menu Intro");
    animation.set_duration(1.2);
    animation.wrap_mode = WrapMode::Once;
    animation.auto_play = true;

    let group_id = animation.add_group("Title", Some(title));
    if let Some(group) = animation.group_mut(group_id) {
        if let Some(track) = group.add_track(TrackKind::Position, &host).and_then(|id| group.track_mut(id)) {
            track.add_clip(
                Clip::new(0.0)
                    .with_end_time(0.5)
                    .with_values(GenericValue::new(-200.0, 0.0, 0.0, 0.0), GenericValue::ZERO)
                    .with_curve(Curve::ease_in_out()),
            );
        }
        if let Some(track) = group.add_track(TrackKind::Alpha, &host).and_then(|id| group.track_mut(id)) {
            track.add_clip(
                Clip::new(0.0)
                    .with_end_time(0.3)
                    .with_values(GenericValue::from_alpha(0.0), GenericValue::from_alpha(1.0)),
            );
        }
    }

    let group_id = animation.add_group("PlayButton", Some(button));
    if let Some(group) = animation.group_mut(group_id) {
        if let Some(track) = group.add_track(TrackKind::Scale, &host).and_then(|id| group.track_mut(id)) {
            track.add_clip(
                Clip::new(0.4)
                    .with_end_time(0.8)
                    .with_values(GenericValue::from_vec3([0.8; 3]), GenericValue::from_vec3([1.0; 3]))
                    .with_curve(Curve::ease_in_out())
                    .with_finish_event("button_ready"),
            );
        }
    }

    let group_id = animation.add_group("Coin", Some(coin));
    if let Some(group) = animation.group_mut(group_id) {
        if let Some(track) = group.add_track(TrackKind::Position2DBezier, &host).and_then(|id| group.track_mut(id)) {
            // Start (0, 0), end (120, 40), controls (30, 90) and (100, 120)
            track.add_clip(
                Clip::new(0.2)
                    .with_end_time(1.0)
                    .with_values(GenericValue::new(0.0, 0.0, 30.0, 100.0), GenericValue::new(120.0, 40.0, 90.0, 120.0)),
            );
        }
    }

    let group_id = animation.add_group("NewBadge", Some(badge));
    if let Some(group) = animation.group_mut(group_id) {
        if let Some(track) = group.add_track(TrackKind::Active, &host).and_then(|id| group.track_mut(id)) {
            track.add_clip(
                Clip::new(0.0)
                    .with_end_time(1.1)
                    .with_values(GenericValue::from_bool(false), GenericValue::from_bool(false)),
            );
            track.add_clip(
                Clip::new(1.1)
                    .with_end_time(1.2)
                    .with_values(GenericValue::from_bool(true), GenericValue::from_bool(true)),
            );
        }
    }

    (host, animation)
}

/// Write the demo animation and scene into `dir`
pub fn write_demo(dir: &Path) -> PreviewResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let (host, animation) = build();

    let animation_path = dir.join(DEMO_ANIMATION_FILE);
    animation.save(&animation_path)?;

    let scene_path = dir.join(DEMO_SCENE_FILE);
    std::fs::write(&scene_path, host.to_ron()?)?;

    tracing::info!("Wrote demo to {:?}", dir);
    Ok((animation_path, scene_path))
}
