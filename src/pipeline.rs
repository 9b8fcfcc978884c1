//! The periodic tick: analyze the current window, then update every view.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::audio::{FrameAnalyzer, FrameResult, PcmBuffer};
use crate::config::VisualizerSettings;
use crate::error::ConfigError;
use crate::views::ViewSet;

/// Shared, live-updatable visualizer settings.
///
/// Any thread may replace the settings; the tick reads one snapshot per call.
#[derive(Clone)]
pub struct SettingsHandle(Arc<ArcSwap<VisualizerSettings>>);

impl SettingsHandle {
    pub fn new(settings: VisualizerSettings) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(settings)))
    }

    pub fn get(&self) -> VisualizerSettings {
        **self.0.load()
    }

    /// Replace the settings wholesale. Out-of-range settings are rejected.
    ///
    /// Pipelines pick the new caps up on their next tick; until then their
    /// histories may still hold more than a lowered cap. A caller that owns the
    /// pipeline can call [`Pipeline::apply_settings`] to truncate right away.
    pub fn set(&self, settings: VisualizerSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.0.store(Arc::new(settings));
        Ok(())
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was analyzed and every view updated.
    Updated,
    /// No buffer is loaded yet.
    NoData,
    /// A buffer exists but no frame could be taken (too short, bad position).
    Skipped,
    /// Analysis hit a numeric failure; views were left untouched.
    Failed,
}

pub struct Pipeline {
    analyzer: FrameAnalyzer,
    views: ViewSet,
    settings: SettingsHandle,
    last_frame: Option<FrameResult>,
}

impl Pipeline {
    pub fn new(settings: SettingsHandle) -> Self {
        let snapshot = settings.get();
        Self {
            analyzer: FrameAnalyzer::new(),
            views: ViewSet::new(
                snapshot.spectrogram_columns as usize,
                snapshot.flux_points as usize,
            ),
            settings,
            last_frame: None,
        }
    }

    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.settings.get().tick_interval_ms())
    }

    /// Apply the current history caps now, truncating views whose cap shrank.
    pub fn apply_settings(&mut self) -> VisualizerSettings {
        let settings = self.settings.get();
        self.views.set_caps(
            settings.spectrogram_columns as usize,
            settings.flux_points as usize,
        );
        settings
    }

    /// Run one analysis pass at `position` and feed the result to every view.
    pub fn tick(&mut self, buffer: Option<&PcmBuffer>, position: f64) -> TickOutcome {
        let settings = self.apply_settings();

        match self
            .analyzer
            .analyze(buffer, position, settings.bar_count as usize)
        {
            Ok(Some(frame)) => {
                self.views.apply(&frame);
                self.last_frame = Some(frame);
                TickOutcome::Updated
            }
            Ok(None) if buffer.is_none() => TickOutcome::NoData,
            Ok(None) => TickOutcome::Skipped,
            Err(err) => {
                log::warn!("Analysis failed at position {:.3}: {}", position, err);
                TickOutcome::Failed
            }
        }
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    pub fn last_frame(&self) -> Option<&FrameResult> {
        self.last_frame.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{SampleProvider, WINDOW_SIZE};
    use std::thread;

    fn pipeline() -> Pipeline {
        Pipeline::new(SettingsHandle::new(VisualizerSettings::default()))
    }

    fn tone(frames: usize) -> PcmBuffer {
        let samples = (0..frames)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        PcmBuffer::mono(samples, 44100)
    }

    #[test]
    fn no_buffer_is_a_no_op() {
        let mut p = pipeline();
        assert_eq!(p.tick(None, 0.5), TickOutcome::NoData);
        assert!(p.views().spectrogram.columns().is_empty());
        assert!(p.last_frame().is_none());
    }

    #[test]
    fn missing_file_then_tick_does_not_crash() {
        let provider = SampleProvider::new();
        provider.load("missing.file");
        let mut p = pipeline();
        assert_eq!(p.tick(provider.current().as_deref(), 0.0), TickOutcome::NoData);
    }

    #[test]
    fn short_buffer_and_bad_position_are_skipped() {
        let mut p = pipeline();
        let short = PcmBuffer::mono(vec![0.1; WINDOW_SIZE / 2], 44100);
        assert_eq!(p.tick(Some(&short), 0.0), TickOutcome::Skipped);

        let buf = tone(8192);
        assert_eq!(p.tick(Some(&buf), 1.5), TickOutcome::Skipped);
        assert!(p.views().spectrogram.columns().is_empty());
    }

    #[test]
    fn ticks_feed_every_view() {
        let mut p = pipeline();
        let buf = tone(44100);
        for i in 0..5 {
            assert_eq!(p.tick(Some(&buf), i as f64 / 10.0), TickOutcome::Updated);
        }
        let views = p.views();
        assert_eq!(views.spectrum.bars().len(), 64);
        assert_eq!(views.spectrogram.columns().len(), 5);
        assert_eq!(views.oscilloscope.samples().len(), WINDOW_SIZE);
        assert_eq!(views.lissajous.len(), WINDOW_SIZE);
        assert_eq!(views.flux.history().len(), 4);
        assert!(views.levels.left > 0.0 && views.levels.left <= 1.0);
        assert_eq!(views.levels.left, views.levels.right);
    }

    #[test]
    fn numeric_failure_leaves_views_untouched() {
        let mut samples = vec![0.2; 4096];
        samples[100] = f32::INFINITY;
        let buf = PcmBuffer::mono(samples, 44100);
        let mut p = pipeline();
        assert_eq!(p.tick(Some(&buf), 0.0), TickOutcome::Failed);
        assert!(p.views().spectrogram.columns().is_empty());
    }

    #[test]
    fn settings_changes_apply_on_next_tick() {
        let handle = SettingsHandle::new(VisualizerSettings::default());
        let mut p = Pipeline::new(handle.clone());
        let buf = tone(44100);
        for i in 0..120 {
            p.tick(Some(&buf), (i % 100) as f64 / 100.0);
        }
        assert_eq!(p.views().spectrogram.columns().len(), 120);

        let remote = handle.clone();
        thread::spawn(move || {
            remote
                .set(VisualizerSettings {
                    bar_count: 16,
                    spectrogram_columns: 50,
                    flux_points: 100,
                    ..Default::default()
                })
                .unwrap();
        })
        .join()
        .unwrap();

        p.tick(Some(&buf), 0.5);
        let views = p.views();
        assert_eq!(views.spectrogram.columns().len(), 50);
        assert_eq!(views.spectrum.bars().len(), 16);
        // the bar count change skips one flux value instead of appending
        assert_eq!(views.flux.history().len(), 100);
        assert_eq!(p.tick_interval(), Duration::from_millis(33));
    }

    #[test]
    fn apply_settings_truncates_without_a_tick() {
        let handle = SettingsHandle::new(VisualizerSettings::default());
        let mut p = Pipeline::new(handle.clone());
        let buf = tone(44100);
        for i in 0..80 {
            p.tick(Some(&buf), i as f64 / 100.0);
        }
        let newest = p.views().spectrogram.columns().latest().cloned();

        handle
            .set(VisualizerSettings {
                spectrogram_columns: 50,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(p.views().spectrogram.columns().len(), 80);

        let applied = p.apply_settings();
        assert_eq!(applied.spectrogram_columns, 50);
        assert_eq!(p.views().spectrogram.columns().len(), 50);
        assert_eq!(p.views().spectrogram.columns().latest().cloned(), newest);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let handle = SettingsHandle::new(VisualizerSettings::default());
        let bad = VisualizerSettings {
            spectrogram_columns: 10,
            ..Default::default()
        };
        assert!(handle.set(bad).is_err());
        assert_eq!(handle.get(), VisualizerSettings::default());
    }
}
