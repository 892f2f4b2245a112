//! Frame timing

/// Simulation clock advanced once per frame by the orchestrator.
///
/// The clock never reads wall time; the caller supplies `dt`, which keeps
/// frame stepping reproducible in tests.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock at frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds. Negative or non-finite steps
    /// are clamped to zero.
    pub fn advance(&mut self, dt: f32) -> u64 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta_time = dt;
        self.total_time += dt;
        self.frame_count += 1;
        self.frame_count
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
