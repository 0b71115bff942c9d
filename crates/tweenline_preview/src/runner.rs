// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-step playback of an animation against an in-memory scene.

use crate::settings::PreviewSettings;
use tweenline_sequencer::{Animation, MemoryHost, PlaybackEvent, PropertyWrite};

/// Summary of a preview run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewReport {
    /// Frames simulated
    pub frames: u32,
    /// Property writes performed
    pub writes: usize,
    /// Times playback reached an end
    pub finished: usize,
    /// Named clip events, in firing order
    pub clip_events: Vec<String>,
    /// Playhead when the run ended
    pub final_time: f32,
}

/// Drives an animation frame by frame
pub struct PreviewRunner {
    animation: Animation,
    host: MemoryHost,
    settings: PreviewSettings,
}

impl PreviewRunner {
    /// Create a runner. Settings overrides are applied and tracks are bound
    /// to the scene.
    pub fn new(mut animation: Animation, host: MemoryHost, settings: PreviewSettings) -> Self {
        settings.apply_to(&mut animation);
        animation.bind(&host);
        Self { animation, host, settings }
    }

    /// The animation being previewed
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The scene being animated
    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    /// Play until the animation stops or the frame limit is hit
    pub fn run(&mut self) -> PreviewReport {
        let dt = self.settings.frame_time();
        let mut report = PreviewReport::default();

        tracing::info!(
            animation = %self.animation.name,
            duration = self.animation.duration(),
            wrap = ?self.animation.wrap_mode,
            "Starting preview"
        );

        if self.animation.auto_play {
            self.animation.start(&mut self.host);
        } else {
            self.animation.play(self.animation.play_mode, &mut self.host);
        }
        self.drain(0, &mut report);

        while self.animation.is_playing() && report.frames < self.settings.max_frames {
            report.frames += 1;
            self.animation.tick(dt, &mut self.host);
            self.drain(report.frames, &mut report);
        }

        if self.animation.is_playing() {
            tracing::warn!(frames = report.frames, "Frame limit reached while playing");
        }

        report.final_time = self.animation.current_time();
        tracing::info!(
            frames = report.frames,
            writes = report.writes,
            finished = report.finished,
            "Preview done"
        );
        report
    }

    fn drain(&mut self, frame: u32, report: &mut PreviewReport) {
        for write in self.host.take_writes() {
            self.log_write(frame, &write);
            report.writes += 1;
        }

        for event in self.animation.take_events() {
            match event {
                PlaybackEvent::ClipFinished { event: Some(name), .. } => {
                    tracing::info!(frame, event = %name, "Clip event");
                    report.clip_events.push(name);
                }
                PlaybackEvent::ClipFinished { event: None, .. } => {}
                PlaybackEvent::Finished { direction } => {
                    tracing::info!(frame, ?direction, "Playback reached the end");
                    report.finished += 1;
                }
            }
        }
    }

    fn log_write(&self, frame: u32, write: &PropertyWrite) {
        let name = self.host.target(write.target).map_or("<missing>", |t| t.name.as_str());
        tracing::debug!(frame, target = name, slot = ?write.slot, value = ?write.value, "write");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use tweenline_sequencer::WrapMode;

    #[test]
    fn once_runs_to_the_end() {
        let (host, animation) = demo::build();
        let mut runner = PreviewRunner::new(animation, host, PreviewSettings::default());
        let report = runner.run();

        assert_eq!(report.finished, 1);
        assert!(report.frames < PreviewSettings::default().max_frames);
        assert!((report.final_time - 1.2).abs() < 1e-4);
        assert!(report.writes > 0);
        assert!(report.clip_events.iter().any(|e| e == "button_ready"));
    }

    #[test]
    fn final_frame_lands_on_end_values() {
        let (host, animation) = demo::build();
        let mut runner = PreviewRunner::new(animation, host, PreviewSettings::default());
        runner.run();

        let host = runner.host();
        let title = host.find("Title").unwrap();
        let badge = host.find("NewBadge").unwrap();
        assert_eq!(host.target(title).map(|t| t.anchored_position), Some([0.0, 0.0, 0.0]));
        assert_eq!(host.target(title).and_then(|t| t.graphic_color).map(|c| c[3]), Some(1.0));
        assert_eq!(host.target(badge).map(|t| t.active), Some(true));
    }

    #[test]
    fn loop_stops_at_frame_limit() {
        let (host, animation) = demo::build();
        let settings = PreviewSettings {
            wrap_mode: Some(WrapMode::Loop),
            max_frames: 200,
            ..Default::default()
        };
        let mut runner = PreviewRunner::new(animation, host, settings);
        let report = runner.run();

        assert_eq!(report.frames, 200);
        assert!(report.finished >= 2);
        assert!(runner.animation().is_playing());
    }
}
