use serde::Serialize;

/// Oscilloscope trace: the latest mono waveform.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OscilloscopeView {
    samples: Vec<f32>,
}

impl OscilloscopeView {
    pub fn update(&mut self, mono: &[f32]) {
        self.samples.clear();
        self.samples.extend_from_slice(mono);
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// Stereo phase figure: left on x, right on y.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LissajousView {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl LissajousView {
    pub fn update(&mut self, left: &[f32], right: &[f32]) {
        self.left.clear();
        self.left.extend_from_slice(left);
        self.right.clear();
        self.right.extend_from_slice(right);
    }

    /// `(left[i], right[i])` pairs, stopping at the shorter channel.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lissajous_pairs_by_index() {
        let mut view = LissajousView::default();
        view.update(&[0.1, 0.2, 0.3], &[-0.1, -0.2, -0.3]);
        let pts: Vec<_> = view.points().collect();
        assert_eq!(pts, vec![(0.1, -0.1), (0.2, -0.2), (0.3, -0.3)]);
    }

    #[test]
    fn updates_replace_previous_data() {
        let mut scope = OscilloscopeView::default();
        scope.update(&[1.0, 0.5]);
        scope.update(&[0.25]);
        assert_eq!(scope.samples(), &[0.25]);

        let mut view = LissajousView::default();
        view.update(&[1.0, 1.0], &[1.0, 1.0]);
        view.update(&[0.5], &[0.5]);
        assert_eq!(view.len(), 1);
    }
}
