use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::buffer::PcmBuffer;
use super::features::FrameResult;
use crate::error::AnalysisError;

/// Frames per analysis window.
pub const WINDOW_SIZE: usize = 2048;
/// Spectrum bins kept after the transform.
pub const SPECTRUM_BINS: usize = 512;

/// Turns a PCM buffer and a playback position into one [`FrameResult`].
///
/// Holds the FFT plan and its work buffers so the periodic tick does not
/// re-plan or reallocate them on every call.
pub struct FrameAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl FrameAnalyzer {
    pub fn new() -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(WINDOW_SIZE);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            fft,
            fft_buffer: vec![Complex::new(0.0, 0.0); WINDOW_SIZE],
            scratch,
        }
    }

    /// Analyze the window at `position` (0.0-1.0 of the track).
    ///
    /// Returns `Ok(None)` when there is nothing to analyze: no buffer, fewer
    /// than [`WINDOW_SIZE`] frames, or a position outside 0.0..=1.0.
    pub fn analyze(
        &mut self,
        buffer: Option<&PcmBuffer>,
        position: f64,
        bar_count: usize,
    ) -> Result<Option<FrameResult>, AnalysisError> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let Some(start) = window_start(buffer.frames(), position) else {
            return Ok(None);
        };

        let (left, right) = buffer.stereo_window(start, WINDOW_SIZE);
        if left.len() < WINDOW_SIZE {
            return Ok(None);
        }
        if let Some(offset) = left
            .iter()
            .zip(&right)
            .position(|(l, r)| !l.is_finite() || !r.is_finite())
        {
            return Err(AnalysisError::NonFiniteSample { start, offset });
        }

        let mono: Vec<f32> = left.iter().zip(&right).map(|(l, r)| (l + r) * 0.5).collect();

        let spectrum = self.spectrum(&mono)?;
        let bars = bar_indices(bar_count, spectrum.len())
            .into_iter()
            .map(|i| spectrum[i])
            .collect();

        Ok(Some(FrameResult {
            bars,
            left: normalize_peak(&left),
            right: normalize_peak(&right),
            mono: normalize_peak(&mono),
            window_start: start,
        }))
    }

    /// log(1 + |X|) of the first [`SPECTRUM_BINS`] bins, scaled so the largest is 1.0.
    fn spectrum(&mut self, mono: &[f32]) -> Result<Vec<f32>, AnalysisError> {
        for (slot, &s) in self.fft_buffer.iter_mut().zip(mono) {
            *slot = Complex::new(s, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.scratch);

        let compressed: Vec<f32> = self.fft_buffer[..SPECTRUM_BINS]
            .iter()
            .map(|c| c.norm().ln_1p())
            .collect();

        if compressed.iter().any(|m| !m.is_finite()) {
            return Err(AnalysisError::NonFiniteSpectrum);
        }

        let max = compressed.iter().copied().fold(0.0f32, f32::max);
        if max > 0.0 {
            Ok(compressed.into_iter().map(|m| m / max).collect())
        } else {
            Ok(compressed)
        }
    }
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// First frame of the analysis window for `position`, or `None` when the
/// buffer is shorter than one window or the position is outside 0.0..=1.0.
pub fn window_start(total_frames: usize, position: f64) -> Option<usize> {
    if total_frames < WINDOW_SIZE || !(0.0..=1.0).contains(&position) {
        return None;
    }
    let last = total_frames - WINDOW_SIZE;
    let start = (position * total_frames as f64).floor() as usize;
    Some(start.min(last))
}

/// Log-spaced spectrum indices for `bar_count` bars over `bins` bins.
///
/// Index `k` is `round(10^(k / (bar_count - 1) * log10(bins - 1)))` clamped to
/// the last bin, so the bars run from bin 1 to bin `bins - 1`. Low bins repeat
/// when there are more bars than distinct low-frequency indices.
pub fn bar_indices(bar_count: usize, bins: usize) -> Vec<usize> {
    if bar_count == 0 || bins == 0 {
        return Vec::new();
    }
    if bar_count == 1 || bins < 2 {
        return vec![1.min(bins - 1); bar_count];
    }

    let top = ((bins - 1) as f64).log10();
    let last = (bar_count - 1) as f64;
    (0..bar_count)
        .map(|k| {
            let idx = 10f64.powf(k as f64 / last * top).round();
            (idx.max(0.0) as usize).min(bins - 1)
        })
        .collect()
}

/// Scale `values` so the largest magnitude becomes 1.0. All-zero input is returned unchanged.
pub fn normalize_peak(values: &[f32]) -> Vec<f32> {
    let peak = values.iter().map(|v| v.abs()).fold(0.0f32, f32::max);
    if peak > 0.0 {
        values.iter().map(|v| v / peak).collect()
    } else {
        values.to_vec()
    }
}

/// Approximate centre frequency (Hz) of a display bar.
pub fn bar_frequency(bar: usize, bar_count: usize, sample_rate: u32) -> f32 {
    let bin = bar_indices(bar_count, SPECTRUM_BINS)
        .get(bar)
        .copied()
        .unwrap_or(0);
    bin as f32 * sample_rate as f32 / WINDOW_SIZE as f32
}
