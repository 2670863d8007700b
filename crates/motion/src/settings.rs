use {serde::Serialize, std::time::Duration};

pub const THRESHOLD_RANGE: (u8, u8) = (10, 100);
pub const MIN_AREA_RANGE: (usize, usize) = (100, 10000);
pub const COOLDOWN_RANGE_SECONDS: (f64, f64) = (1.0, 10.0);

/// Frames consumed to seed the reference before classification starts.
pub const WARMUP_FRAMES: usize = 10;
pub const BLUR_KERNEL: usize = 21;
pub const CLOSE_KERNEL: usize = 5;
pub const DILATE_ITERATIONS: usize = 3;
pub const ERODE_ITERATIONS: usize = 1;
/// Regions must be strictly wider and taller than this.
pub const MIN_REGION_SIDE: usize = 50;
/// Open interval of accepted width / height ratios.
pub const ASPECT_BAND: (f32, f32) = (0.2, 5.0);

/// Tunable detector parameters. Every setter clamps into the safe range,
/// so a `MotionSettings` value is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionSettings {
    threshold: u8,
    min_area: usize,
    cooldown_seconds: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            threshold: 35,
            min_area: 2000,
            cooldown_seconds: 3.0,
        }
    }
}

impl MotionSettings {
    /// Per-pixel intensity change needed to count as different.
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold.clamp(THRESHOLD_RANGE.0 as i64, THRESHOLD_RANGE.1 as i64) as u8;
        self
    }

    pub fn with_min_area(mut self, min_area: i64) -> Self {
        self.min_area = min_area.clamp(MIN_AREA_RANGE.0 as i64, MIN_AREA_RANGE.1 as i64) as usize;
        self
    }

    /// NaN falls back to the lower bound.
    pub fn with_cooldown_seconds(mut self, seconds: f64) -> Self {
        self.cooldown_seconds = if seconds.is_nan() {
            COOLDOWN_RANGE_SECONDS.0
        } else {
            seconds.clamp(COOLDOWN_RANGE_SECONDS.0, COOLDOWN_RANGE_SECONDS.1)
        };
        self
    }

    /// Apply the parameters that are present, leaving the rest untouched.
    pub fn apply(self, params: &MotionParameters) -> Self {
        let mut settings = self;
        if let Some(threshold) = params.threshold {
            settings = settings.with_threshold(threshold);
        }
        if let Some(min_area) = params.min_area {
            settings = settings.with_min_area(min_area);
        }
        if let Some(cooldown) = params.cooldown_seconds {
            settings = settings.with_cooldown_seconds(cooldown);
        }
        settings
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn min_area(&self) -> usize {
        self.min_area
    }

    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_seconds)
    }
}

/// Partial update, as received from a control surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionParameters {
    pub threshold: Option<i64>,
    pub min_area: Option<i64>,
    pub cooldown_seconds: Option<f64>,
}
