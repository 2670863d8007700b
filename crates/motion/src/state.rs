use {crate::WARMUP_FRAMES, std::time::Instant};

/// Hysteresis state of the detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionState {
    pub detected: bool,
    pub initialization_count: usize,
    pub motion_started_at: Option<Instant>,
    pub motion_ended_at: Option<Instant>,
}

impl MotionState {
    pub fn is_initializing(&self) -> bool {
        self.initialization_count < WARMUP_FRAMES
    }
}
