/// Decoded audio held fully in memory.
///
/// Samples are interleaved frame by frame (`frames x channels`). A buffer is
/// never mutated once built; consumers share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct PcmBuffer {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
}

impl PcmBuffer {
    /// Build a buffer from interleaved samples. A trailing partial frame is dropped.
    pub fn from_interleaved(mut samples: Vec<f32>, channels: usize, sample_rate: u32) -> Self {
        let channels = channels.max(1);
        let whole = samples.len() - samples.len() % channels;
        samples.truncate(whole);
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::from_interleaved(samples, 1, sample_rate)
    }

    /// Two-channel buffer from separate left/right channels (truncated to the shorter one).
    pub fn stereo(left: &[f32], right: &[f32], sample_rate: u32) -> Self {
        let samples = left
            .iter()
            .zip(right)
            .flat_map(|(&l, &r)| [l, r])
            .collect();
        Self::from_interleaved(samples, 2, sample_rate)
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Duration in seconds, or zero when the sample rate is unknown.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Copy `len` frames starting at `start` into separate left/right vectors.
    ///
    /// Mono buffers have their only channel duplicated into both outputs.
    /// Buffers with more than two channels use channels 0 and 1.
    pub fn stereo_window(&self, start: usize, len: usize) -> (Vec<f32>, Vec<f32>) {
        let end = (start + len).min(self.frames());
        let start = start.min(end);
        let frames = &self.samples[start * self.channels..end * self.channels];

        let mut left = Vec::with_capacity(end - start);
        let mut right = Vec::with_capacity(end - start);
        for frame in frames.chunks_exact(self.channels) {
            let l = frame[0];
            let r = if self.channels >= 2 { frame[1] } else { l };
            left.push(l);
            right.push(r);
        }
        (left, right)
    }
}
