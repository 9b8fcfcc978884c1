use serde::Serialize;

/// VU meter levels, each in 0.0..=1.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LevelsView {
    pub left: f32,
    pub right: f32,
}

impl LevelsView {
    pub fn set_levels(&mut self, left: f32, right: f32) {
        self.left = left.clamp(0.0, 1.0);
        self.right = right.clamp(0.0, 1.0);
    }
}
