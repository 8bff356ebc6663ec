use glam::DVec2;

/// Latest pointer reading in physical window pixels.
///
/// Only window events write it and the simulation reads it once per frame,
/// so every tick in a frame sees the same reading.
#[derive(Debug, Default)]
pub struct PointerInput {
    latest: DVec2,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor position from the window.
    pub fn record(&mut self, x: f64, y: f64) {
        self.latest = DVec2::new(x, y);
    }

    /// Current reading. Stays at the origin until the cursor first moves.
    pub fn read(&self) -> DVec2 {
        self.latest
    }
}
