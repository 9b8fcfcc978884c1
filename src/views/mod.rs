//! Per-view state derived from analyzer output.
//!
//! Each view is independent; [`ViewSet`] just fans one frame out to all six.

pub mod flux;
pub mod history;
pub mod levels;
pub mod scope;
pub mod spectrogram;
pub mod spectrum;

use serde::Serialize;

use crate::audio::FrameResult;

pub use flux::FluxView;
pub use history::BoundedHistory;
pub use levels::LevelsView;
pub use scope::{LissajousView, OscilloscopeView};
pub use spectrogram::SpectrogramView;
pub use spectrum::SpectrumView;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ViewSet {
    pub spectrum: SpectrumView,
    pub spectrogram: SpectrogramView,
    pub oscilloscope: OscilloscopeView,
    pub lissajous: LissajousView,
    pub flux: FluxView,
    pub levels: LevelsView,
}

impl ViewSet {
    pub fn new(spectrogram_columns: usize, flux_points: usize) -> Self {
        Self {
            spectrogram: SpectrogramView::new(spectrogram_columns),
            flux: FluxView::new(flux_points),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, frame: &FrameResult) {
        self.spectrum.update(&frame.bars);
        self.spectrogram.add_column(&frame.bars);
        self.oscilloscope.update(&frame.mono);
        self.lissajous.update(&frame.left, &frame.right);
        self.flux.update(&frame.bars);
        let (left, right) = frame.levels();
        self.levels.set_levels(left, right);
    }

    /// Apply new history caps, truncating existing history when they shrink.
    pub fn set_caps(&mut self, spectrogram_columns: usize, flux_points: usize) {
        if self.spectrogram.max_columns() != spectrogram_columns {
            log::debug!(
                "Spectrogram columns {} -> {}",
                self.spectrogram.max_columns(),
                spectrogram_columns
            );
            self.spectrogram.set_max_columns(spectrogram_columns);
        }
        if self.flux.max_points() != flux_points {
            log::debug!("Flux points {} -> {}", self.flux.max_points(), flux_points);
            self.flux.set_max_points(flux_points);
        }
    }
}
