use serde::Serialize;

/// Latest bar vector, replaced on every update.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SpectrumView {
    bars: Vec<f32>,
}

impl SpectrumView {
    pub fn update(&mut self, bars: &[f32]) {
        self.bars.clear();
        self.bars.extend_from_slice(bars);
    }

    pub fn bars(&self) -> &[f32] {
        &self.bars
    }
}
