use instant::Instant;

/// Which phase of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FramePhase {
    Simulate = 0,
    BuildVertices = 1,
    GpuUpload = 2,
    RenderSubmit = 3,
}

impl FramePhase {
    pub const ALL: [FramePhase; 4] = [
        Self::Simulate,
        Self::BuildVertices,
        Self::GpuUpload,
        Self::RenderSubmit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Simulate => "Simulate",
            Self::BuildVertices => "Build Verts",
            Self::GpuUpload => "GPU Upload",
            Self::RenderSubmit => "Render",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct PhaseTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 4],
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 4],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes.
    pub fn end(&mut self, phase: FramePhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: FramePhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooths_towards_recent_samples() {
        let mut t = PhaseTimers::new();
        t.record(FramePhase::GpuUpload, 100.0);
        assert!((t.durations_us[2] - 10.0).abs() < 1e-9);
        for _ in 0..200 {
            t.record(FramePhase::GpuUpload, 100.0);
        }
        assert!((t.durations_us[2] - 100.0).abs() < 1e-3);
        assert_eq!(t.durations_us[0], 0.0);
        assert!((t.total_us() - t.durations_us[2]).abs() < 1e-12);
    }

    #[test]
    fn every_phase_has_a_slot() {
        for (i, phase) in FramePhase::ALL.iter().enumerate() {
            assert_eq!(*phase as usize, i);
            assert!(!phase.label().is_empty());
        }
    }
}
