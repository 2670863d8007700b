use {base::Vec2, motion::MotionSettings, recorder::RecorderConfig, std::time::Duration};

/// Capture loop configuration.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    startup_guard: Duration,
    placeholder_size: Vec2<usize>,
    idle_interval: Duration,
    reconnect_delay: Duration,
    motion: MotionSettings,
    recorder: RecorderConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            startup_guard: Duration::from_secs(2),
            placeholder_size: Vec2::new(640, 480),
            idle_interval: Duration::from_millis(33),
            reconnect_delay: Duration::from_secs(1),
            motion: MotionSettings::default(),
            recorder: RecorderConfig::default(),
        }
    }
}

impl CaptureConfig {
    /// Window after start during which detections are ignored.
    pub fn with_startup_guard(mut self, startup_guard: Duration) -> Self {
        self.startup_guard = startup_guard;
        self
    }

    pub fn with_placeholder_size(mut self, placeholder_size: Vec2<usize>) -> Self {
        self.placeholder_size = placeholder_size;
        self
    }

    /// Pause between loop iterations while no camera delivers frames.
    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    pub fn with_reconnect_delay(mut self, reconnect_delay: Duration) -> Self {
        self.reconnect_delay = reconnect_delay;
        self
    }

    /// Initial detector settings.
    pub fn with_motion(mut self, motion: MotionSettings) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_recorder(mut self, recorder: RecorderConfig) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn startup_guard(&self) -> Duration {
        self.startup_guard
    }

    pub fn placeholder_size(&self) -> Vec2<usize> {
        self.placeholder_size
    }

    pub fn idle_interval(&self) -> Duration {
        self.idle_interval
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    pub fn motion(&self) -> MotionSettings {
        self.motion
    }

    pub fn recorder(&self) -> &RecorderConfig {
        &self.recorder
    }
}
