use serde::Serialize;

use super::history::BoundedHistory;

pub const DEFAULT_COLUMNS: usize = 200;

/// Scrolling spectrogram: one bar vector per tick, oldest column on the left.
#[derive(Clone, Debug, Serialize)]
pub struct SpectrogramView {
    columns: BoundedHistory<Vec<f32>>,
}

impl SpectrogramView {
    pub fn new(max_columns: usize) -> Self {
        Self {
            columns: BoundedHistory::new(max_columns),
        }
    }

    pub fn add_column(&mut self, bars: &[f32]) {
        self.columns.push(bars.to_vec());
    }

    pub fn set_max_columns(&mut self, max_columns: usize) {
        self.columns.set_cap(max_columns);
    }

    pub fn max_columns(&self) -> usize {
        self.columns.cap()
    }

    pub fn columns(&self) -> &BoundedHistory<Vec<f32>> {
        &self.columns
    }
}

impl Default for SpectrogramView {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_columns_in_order() {
        let mut view = SpectrogramView::new(3);
        for i in 0..4 {
            view.add_column(&[i as f32]);
        }
        let cols: Vec<f32> = view.columns().iter().map(|c| c[0]).collect();
        assert_eq!(cols, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn shrinking_truncates_to_most_recent() {
        let mut view = SpectrogramView::default();
        for i in 0..200 {
            view.add_column(&[i as f32, 0.0]);
        }
        assert_eq!(view.columns().len(), 200);

        view.set_max_columns(50);
        let cols: Vec<f32> = view.columns().iter().map(|c| c[0]).collect();
        assert_eq!(cols.len(), 50);
        assert_eq!(cols, (150..200).map(|i| i as f32).collect::<Vec<_>>());
    }
}
