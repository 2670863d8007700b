use {
    crate::*,
    base::Clock,
    image::{
        Image, Kernel, Region, abs_diff, close, dilate, erode, external_regions, gaussian_blur,
        rgb_to_gray, threshold,
    },
    std::sync::Arc,
};

/// Classifies a stream of RGB8 frames into a debounced "motion active" flag.
///
/// Each frame is compared against the previous one (after grayscale and
/// blur), not against a fixed background. The first `WARMUP_FRAMES` frames
/// only seed the reference.
pub struct MotionDetector {
    settings: MotionSettings,
    state: MotionState,
    reference: Option<Image>,
    close_kernel: Kernel,
    grow_kernel: Kernel,
    last_area: usize,
    clock: Arc<dyn Clock>,
}

impl MotionDetector {
    pub fn new(settings: MotionSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            state: MotionState::default(),
            reference: None,
            close_kernel: Kernel::ellipse(CLOSE_KERNEL, CLOSE_KERNEL),
            grow_kernel: Kernel::rect(3, 3),
            last_area: 0,
            clock,
        }
    }

    pub fn settings(&self) -> MotionSettings {
        self.settings
    }

    /// Takes effect from the next frame on; detector state is kept.
    pub fn apply_settings(&mut self, settings: MotionSettings) {
        if settings != self.settings {
            log::info!(
                "motion settings: threshold {}, min area {}, cooldown {:.1}s",
                settings.threshold(),
                settings.min_area(),
                settings.cooldown_seconds()
            );
        }
        self.settings = settings;
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_initializing(&self) -> bool {
        self.state.is_initializing()
    }

    pub fn detected(&self) -> bool {
        self.state.detected
    }

    /// Accumulated region area of the last classified frame.
    pub fn last_area(&self) -> usize {
        self.last_area
    }

    /// Feed the next frame and return the debounced motion flag.
    pub fn classify(&mut self, frame: &Image) -> bool {
        if self.state.is_initializing() {
            self.state.initialization_count += 1;
            if !self.state.is_initializing() {
                match self.preprocess(frame) {
                    Ok(gray) => {
                        self.reference = Some(gray);
                        log::info!(
                            "motion detector initialized after {} frames",
                            self.state.initialization_count
                        );
                    }
                    Err(error) => log::warn!("could not seed motion reference: {}", error),
                }
            }
            return false;
        }

        let gray = match self.preprocess(frame) {
            Ok(gray) => gray,
            Err(error) => {
                log::warn!("skipping frame: {}", error);
                return self.update(0);
            }
        };

        let area = match &self.reference {
            Some(reference) if reference.size == gray.size => {
                match self.motion_area(reference, &gray) {
                    Ok(area) => area,
                    Err(error) => {
                        log::warn!("motion measurement failed: {}", error);
                        0
                    }
                }
            }
            Some(reference) => {
                log::warn!(
                    "frame size changed from {} to {}, reseeding reference",
                    reference.size,
                    gray.size
                );
                0
            }
            None => 0,
        };

        self.reference = Some(gray);
        self.update(area)
    }

    fn preprocess(&self, frame: &Image) -> Result<Image, MotionError> {
        let gray = rgb_to_gray(frame)?;
        Ok(gaussian_blur(&gray, BLUR_KERNEL)?)
    }

    fn accepts(&self, region: &Region) -> bool {
        let bounds = &region.bounds;
        let aspect = bounds.aspect_ratio();
        bounds.area() > self.settings.min_area()
            && bounds.size.x > MIN_REGION_SIDE
            && bounds.size.y > MIN_REGION_SIDE
            && aspect > ASPECT_BAND.0
            && aspect < ASPECT_BAND.1
    }

    // total bounding-box area of the regions that pass the filter
    fn motion_area(&self, reference: &Image, gray: &Image) -> Result<usize, MotionError> {
        let delta = abs_diff(reference, gray)?;
        let mask = threshold(&delta, self.settings.threshold())?;
        let mask = close(&mask, &self.close_kernel)?;
        let mask = dilate(&mask, &self.grow_kernel, DILATE_ITERATIONS)?;
        let mask = erode(&mask, &self.grow_kernel, ERODE_ITERATIONS)?;

        Ok(external_regions(&mask)?
            .iter()
            .filter(|region| self.accepts(region))
            .map(|region| region.bounds.area())
            .sum())
    }

    // cooldown runs from the first quiet frame; any moving frame cancels it
    fn update(&mut self, area: usize) -> bool {
        self.last_area = area;
        let raw = area > self.settings.min_area() * 2;
        let now = self.clock.now();

        match (raw, self.state.detected) {
            (true, false) => {
                self.state.detected = true;
                self.state.motion_started_at = Some(now);
                log::info!("motion started, area {}px", area);
            }
            (true, true) => {
                self.state.motion_ended_at = None;
            }
            (false, true) => match self.state.motion_ended_at {
                None => self.state.motion_ended_at = Some(now),
                Some(ended_at) if now.duration_since(ended_at) > self.settings.cooldown() => {
                    self.state.detected = false;
                    self.state.motion_started_at = None;
                    self.state.motion_ended_at = None;
                    log::info!("motion ended");
                }
                Some(_) => {}
            },
            (false, false) => {}
        }

        self.state.detected
    }
}
