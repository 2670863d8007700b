use {
    crate::*,
    base::Clock,
    image::Image,
    motion::{MotionDetector, MotionSettings, WARMUP_FRAMES},
    recorder::{RecordingSession, RecordingSummary},
    std::{
        sync::Arc,
        time::{Duration, Instant},
    },
    video::{FrameSource, VideoError},
};

/// One capture run: owns the frame source, the detector and the recording
/// session from start until `shutdown`. Driven by a single thread calling
/// `process_frame` in a loop.
pub struct CameraRuntime {
    config: CaptureConfig,
    source: Box<dyn FrameSource>,
    source_open: bool,
    offline: Placeholder,
    last_open_attempt: Option<Instant>,
    detector: MotionDetector,
    session: RecordingSession,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    started_at: Instant,
    // set by a total encoder failure, cleared when the motion episode ends
    encoder_blocked: bool,
    encoder_reported: bool,
}

impl CameraRuntime {
    pub fn new(
        config: CaptureConfig,
        source: Box<dyn FrameSource>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let detector = MotionDetector::new(config.motion(), Arc::clone(&clock));
        let session = RecordingSession::new(config.recorder().clone(), Arc::clone(&clock));
        let started_at = clock.now();
        log::info!("capture started on {}", source.name());
        Self {
            config,
            source,
            source_open: false,
            offline: Placeholder::NoCamera,
            last_open_attempt: None,
            detector,
            session,
            notifier,
            clock,
            started_at,
            encoder_blocked: false,
            encoder_reported: false,
        }
    }

    pub fn phase(&self) -> CapturePhase {
        if self.guard_remaining() > Duration::ZERO {
            CapturePhase::StartupGuard
        } else if self.detector.is_initializing() {
            CapturePhase::Initializing
        } else {
            CapturePhase::Armed
        }
    }

    fn guard_remaining(&self) -> Duration {
        let elapsed = self.clock.now().saturating_duration_since(self.started_at);
        self.config.startup_guard().saturating_sub(elapsed)
    }

    /// Whether the last frame came from the camera.
    pub fn is_live(&self) -> bool {
        self.source_open
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_active()
    }

    pub fn settings(&self) -> MotionSettings {
        self.detector.settings()
    }

    pub fn apply_settings(&mut self, settings: MotionSettings) {
        self.detector.apply_settings(settings);
    }

    pub fn motion_status(&self) -> MotionStatus {
        let phase = self.phase();
        let state = self.detector.state();
        MotionStatus {
            motion_detected: phase == CapturePhase::Armed && state.detected,
            recording: self.session.status(),
            startup_guard_active: phase == CapturePhase::StartupGuard,
            startup_remaining_seconds: self.guard_remaining().as_secs_f64(),
            initialization_period: state.is_initializing(),
            initialization_progress: state.initialization_count,
            initialization_required: WARMUP_FRAMES,
            phase,
            settings: self.detector.settings(),
        }
    }

    /// Run one loop iteration and return the frame to display. Never fails:
    /// without a usable camera picture the result is a placeholder, and
    /// detector and recording are left alone for that cycle.
    pub fn process_frame(&mut self) -> Image {
        let frame = match self.acquire() {
            Ok(frame) => frame,
            Err(kind) => return self.placeholder(kind),
        };
        match self.handle(frame) {
            Ok(frame) => frame,
            Err(error) => {
                log::error!("frame processing failed: {}", error);
                self.placeholder(Placeholder::CameraError)
            }
        }
    }

    pub fn placeholder(&self, kind: Placeholder) -> Image {
        placeholder_frame(kind, self.config.placeholder_size(), &self.clock.local_time())
    }

    /// Treat the source as failed after an iteration was aborted.
    pub fn recover(&mut self) {
        self.mark_offline(Placeholder::CameraError);
    }

    fn mark_offline(&mut self, kind: Placeholder) {
        if self.source_open {
            self.source.close();
            self.source_open = false;
        }
        self.offline = kind;
        self.last_open_attempt = Some(self.clock.now());
    }

    fn acquire(&mut self) -> Result<Image, Placeholder> {
        if !self.source_open {
            let now = self.clock.now();
            if let Some(at) = self.last_open_attempt {
                if now.saturating_duration_since(at) < self.config.reconnect_delay() {
                    return Err(self.offline);
                }
            }
            self.last_open_attempt = Some(now);
            match self.source.open() {
                Ok(size) => {
                    log::info!("camera {} open at {}", self.source.name(), size);
                    self.source_open = true;
                }
                Err(error) => {
                    self.offline = offline_kind(&error);
                    log::warn!("camera unavailable: {}", error);
                    return Err(self.offline);
                }
            }
        }

        match self.source.blocking_capture() {
            Ok(frame) => Ok(frame.color),
            Err(error) => {
                log::error!("capture from {} failed: {}", self.source.name(), error);
                let kind = offline_kind(&error);
                self.mark_offline(kind);
                log::info!(
                    "reconnecting in {:.1}s",
                    self.config.reconnect_delay().as_secs_f64()
                );
                Err(kind)
            }
        }
    }

    fn handle(&mut self, frame: Image) -> Result<Image, CaptureError> {
        let detected = self.detector.classify(&frame);
        let phase = self.phase();

        match phase {
            CapturePhase::StartupGuard | CapturePhase::Initializing => {
                if self.session.is_active() {
                    let summary = self.session.stop();
                    if phase == CapturePhase::StartupGuard {
                        log::info!(
                            "recording stopped during startup guard ({:.1}s left)",
                            self.guard_remaining().as_secs_f64()
                        );
                    } else {
                        log::info!(
                            "recording stopped during detector warm-up ({}/{})",
                            self.detector.state().initialization_count,
                            WARMUP_FRAMES
                        );
                    }
                    self.emit(RecordingEvent::Finished(summary));
                }
            }
            CapturePhase::Armed => {
                if detected {
                    if !self.session.is_active() && !self.encoder_blocked {
                        self.start_recording(&frame);
                    }
                } else {
                    self.encoder_blocked = false;
                    if self.session.is_active() {
                        let summary = self.session.stop();
                        self.emit(RecordingEvent::Finished(summary));
                    }
                }
                if self.session.is_active() {
                    self.session.append(&frame);
                }
            }
            CapturePhase::Stopped => {}
        }

        let mut display = frame;
        draw_overlay(
            &mut display,
            phase == CapturePhase::Armed && detected,
            self.session.is_active(),
            &self.clock.local_time(),
        )?;
        Ok(display)
    }

    fn start_recording(&mut self, frame: &Image) {
        if let Err(error) = self.session.start(frame) {
            log::error!("recording disabled until motion ends: {}", error);
            self.encoder_blocked = true;
            if !self.encoder_reported {
                self.encoder_reported = true;
                self.emit(RecordingEvent::EncoderUnavailable {
                    reason: error.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: RecordingEvent) {
        if let Err(error) = self.notifier.notify(&event) {
            log::warn!("could not deliver {:?}: {}", event, error);
        }
    }

    /// Close any open recording and release the camera.
    pub fn shutdown(mut self) -> Option<RecordingSummary> {
        let summary = if self.session.is_active() {
            let summary = self.session.stop();
            self.emit(RecordingEvent::Finished(summary.clone()));
            Some(summary)
        } else {
            None
        };
        if self.source_open {
            self.source.close();
            self.source_open = false;
        }
        log::info!("capture stopped");
        summary
    }
}

fn offline_kind(error: &VideoError) -> Placeholder {
    match error {
        VideoError::Unavailable(_) => Placeholder::NoCamera,
        _ => Placeholder::CameraError,
    }
}
