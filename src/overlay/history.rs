/// Fixed-capacity history of frame times (seconds). Pre-allocated, oldest
/// samples are overwritten once full.
pub struct FrameHistory {
    buf: Vec<f64>,
    head: usize,
    len: usize,
}

/// Summary of the frames currently held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub fps: f64,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0.0; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, dt: f64) {
        let cap = self.buf.len();
        self.buf[self.head] = dt;
        self.head = (self.head + 1) % cap;
        if self.len < cap {
            self.len += 1;
        }
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let cap = self.buf.len();
        let start = if self.len < cap { 0 } else { self.head };
        (0..self.len).map(move |i| self.buf[(start + i) % cap])
    }

    pub fn summary(&self) -> FrameSummary {
        if self.len == 0 {
            return FrameSummary::default();
        }
        let (sum, min, max) = self
            .iter()
            .fold((0.0, f64::MAX, 0.0f64), |(s, lo, hi), t| (s + t, lo.min(t), hi.max(t)));
        let avg = sum / self.len as f64;
        FrameSummary {
            avg,
            min,
            max,
            fps: if avg > 0.0 { 1.0 / avg } else { 0.0 },
        }
    }
}
