use std::collections::VecDeque;

use figure_globe::{
    random::RandomSource,
    render::FrameRecorder,
    scene::Scene,
};

/// Replays a fixed list of integers from `int_in`, clamped into the requested range.
pub(crate) struct SequenceSource {
    values: VecDeque<u32>,
    pub calls: usize,
}

impl SequenceSource {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            calls: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        0.0
    }

    fn int_in(&mut self, range: std::ops::Range<u32>) -> u32 {
        self.calls += 1;
        let value = self.values.pop_front().unwrap_or(range.start);
        value.clamp(range.start, range.end.saturating_sub(1).max(range.start))
    }
}

pub(crate) fn scene() -> Scene<FrameRecorder> {
    Scene::new(800, 600, FrameRecorder::new())
}

pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {} but got {}",
        expected,
        actual
    );
}
