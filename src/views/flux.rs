use serde::Serialize;

use super::history::BoundedHistory;

pub const DEFAULT_POINTS: usize = 2000;

/// Divisor applied to the summed bar difference before clamping to 1.0.
const FLUX_SCALE: f32 = 10.0;

/// Onset strength history from frame-to-frame bar differences.
#[derive(Clone, Debug, Serialize)]
pub struct FluxView {
    history: BoundedHistory<f32>,
    #[serde(skip)]
    prev: Option<Vec<f32>>,
}

impl FluxView {
    pub fn new(max_points: usize) -> Self {
        Self {
            history: BoundedHistory::new(max_points),
            prev: None,
        }
    }

    /// Record the flux between `bars` and the previous update, if comparable.
    ///
    /// The first update, or one whose length differs from the previous, only
    /// stores `bars` for the next comparison.
    pub fn update(&mut self, bars: &[f32]) -> Option<f32> {
        let flux = match &self.prev {
            Some(prev) if prev.len() == bars.len() => Some(spectral_flux(prev, bars)),
            _ => None,
        };
        if let Some(value) = flux {
            self.history.push(value);
        }

        let prev = self.prev.get_or_insert_with(Vec::new);
        prev.clear();
        prev.extend_from_slice(bars);
        flux
    }

    pub fn set_max_points(&mut self, max_points: usize) {
        self.history.set_cap(max_points);
    }

    pub fn max_points(&self) -> usize {
        self.history.cap()
    }

    pub fn history(&self) -> &BoundedHistory<f32> {
        &self.history
    }
}

impl Default for FluxView {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS)
    }
}

/// Sum of absolute bar differences, scaled and clamped to 0.0..=1.0.
pub fn spectral_flux(prev: &[f32], current: &[f32]) -> f32 {
    let sum: f32 = current
        .iter()
        .zip(prev)
        .map(|(cur, prev)| (cur - prev).abs())
        .sum();
    (sum / FLUX_SCALE).min(1.0)
}
