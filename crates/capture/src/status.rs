use {motion::MotionSettings, recorder::RecordingStatus, serde::Serialize};

/// Where the capture loop stands in its start-up sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CapturePhase {
    #[default]
    Stopped,
    /// Right after start, while exposure and focus settle.
    StartupGuard,
    /// Detector still collecting warm-up frames.
    Initializing,
    Armed,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionStatus {
    /// Debounced detection, only ever true while armed.
    pub motion_detected: bool,
    pub recording: RecordingStatus,
    pub startup_guard_active: bool,
    pub startup_remaining_seconds: f64,
    pub initialization_period: bool,
    pub initialization_progress: usize,
    pub initialization_required: usize,
    pub phase: CapturePhase,
    pub settings: MotionSettings,
}

/// Outcome of a start/stop request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Started,
    AlreadyActive,
    Stopped,
    AlreadyStopped,
}
