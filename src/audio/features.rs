use serde::Serialize;

/// Everything the views need for one instant of the track.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameResult {
    /// Log-spaced spectrum samples (0.0-1.0), one per display bar
    pub bars: Vec<f32>,
    /// Left channel waveform, peak-normalized on its own
    pub left: Vec<f32>,
    /// Right channel waveform, peak-normalized on its own
    pub right: Vec<f32>,
    /// (left + right) / 2 waveform, peak-normalized on its own
    pub mono: Vec<f32>,
    /// First frame of the analysis window within the buffer
    pub window_start: usize,
}

impl FrameResult {
    /// Mean absolute level of the left/right waveforms, each clamped to 1.0.
    pub fn levels(&self) -> (f32, f32) {
        (mean_abs(&self.left).min(1.0), mean_abs(&self.right).min(1.0))
    }
}

fn mean_abs(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs()).sum::<f32>() / values.len() as f32
}
