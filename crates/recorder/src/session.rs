use {
    crate::*,
    base::{Clock, Vec2},
    chrono::{DateTime, Local},
    image::Image,
    serde::Serialize,
    std::{
        fs,
        path::{Path, PathBuf},
        sync::Arc,
        time::{Duration, Instant},
    },
};

// frames between achieved-rate reports
const RATE_REPORT_INTERVAL: u64 = 30;

/// What a finished recording amounts to. All zero when nothing was recorded.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSummary {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub duration_seconds: f64,
    pub frame_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingStatus {
    pub active: bool,
    /// Path of the current recording, or of the last one once stopped.
    pub file_path: Option<PathBuf>,
    pub started_at: Option<String>,
    pub frame_count: u64,
    pub duration_seconds: f64,
    pub target_frame_interval_seconds: f64,
    pub encoder: Option<String>,
}

struct ActiveRecording {
    writer: Box<dyn VideoWriter>,
    path: PathBuf,
    encoder: String,
    chain_position: usize,
    started_at: Instant,
    started_local: DateTime<Local>,
    frame_count: u64,
    last_write: Option<Instant>,
}

/// Lifecycle of one recording file at a time: `start`, any number of
/// `append`, `stop`.
pub struct RecordingSession {
    config: RecorderConfig,
    clock: Arc<dyn Clock>,
    active: Option<ActiveRecording>,
    last_path: Option<PathBuf>,
}

impl RecordingSession {
    pub fn new(config: RecorderConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            active: None,
            last_path: None,
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.target_fps() as f64)
    }

    /// Open a new file sized after `sample` with the first encoder of the
    /// chain that works. Does nothing while a recording is already open.
    pub fn start(&mut self, sample: &Image) -> Result<(), RecordError> {
        if let Some(active) = &self.active {
            log::debug!("already recording to {}", active.path.display());
            return Ok(());
        }
        sample.validate()?;

        fs::create_dir_all(self.config.directory())?;
        let started_local = self.clock.local_time();
        match self.open_chain(0, sample.size, started_local) {
            Ok(active) => {
                self.last_path = Some(active.path.clone());
                self.active = Some(active);
                Ok(())
            }
            Err(reason) => {
                log::error!("could not start recording: {}", reason);
                Err(RecordError::NoEncoder(reason))
            }
        }
    }

    // first working encoder at or after `first` in the chain
    fn open_chain(
        &self,
        first: usize,
        size: Vec2<usize>,
        started_local: DateTime<Local>,
    ) -> Result<ActiveRecording, String> {
        let directory = self.config.directory();
        let fps = self.config.target_fps();

        let mut failures = Vec::new();
        for (position, encoder) in self.config.encoders().iter().enumerate().skip(first) {
            let path = unique_recording_path(directory, &started_local, encoder.extension());
            match encoder.open(&path, size, fps) {
                Ok(writer) => {
                    log::info!(
                        "recording to {} with {} at {} fps, {}",
                        path.display(),
                        encoder.name(),
                        fps,
                        size
                    );
                    return Ok(ActiveRecording {
                        writer,
                        path,
                        encoder: encoder.name().to_string(),
                        chain_position: position,
                        started_at: self.clock.now(),
                        started_local,
                        frame_count: 0,
                        last_write: None,
                    });
                }
                Err(error) => {
                    log::warn!("encoder {} failed, trying next: {}", encoder.name(), error);
                    remove_partial(&path);
                    failures.push(format!("{}: {}", encoder.name(), error));
                }
            }
        }

        if failures.is_empty() {
            Err("no encoders configured".to_string())
        } else {
            Err(failures.join("; "))
        }
    }

    /// Stamp and write one frame, blocking first so writes never come closer
    /// together than the target frame interval. Failures are logged and the
    /// frame is dropped. An encoder that fails before its first frame is
    /// replaced by the next one of the chain.
    pub fn append(&mut self, frame: &Image) {
        let interval = self.frame_interval();
        let Some(active) = self.active.as_ref() else {
            return;
        };

        if let Some(last_write) = active.last_write {
            let elapsed = self.clock.now().saturating_duration_since(last_write);
            if elapsed < interval {
                self.clock.sleep(interval - elapsed);
            }
        }

        let mut stamped = frame.clone();
        if let Err(error) = stamp_datetime(&mut stamped, &self.clock.local_time()) {
            log::warn!("could not stamp frame: {}", error);
        }

        loop {
            let Some(active) = self.active.as_mut() else {
                return;
            };
            active.last_write = Some(self.clock.now());
            match active.writer.write_frame(&stamped) {
                Ok(()) => {
                    active.frame_count += 1;
                    if active.frame_count % RATE_REPORT_INTERVAL == 0 {
                        let elapsed = self
                            .clock
                            .now()
                            .saturating_duration_since(active.started_at)
                            .as_secs_f64();
                        if elapsed > 0.0 {
                            log::debug!(
                                "recording at {:.1} fps (target {})",
                                active.frame_count as f64 / elapsed,
                                self.config.target_fps()
                            );
                        }
                    }
                    return;
                }
                Err(error @ (RecordError::Write(_) | RecordError::Io(_)))
                    if active.frame_count == 0 =>
                {
                    log::warn!(
                        "encoder {} failed on its first frame: {}",
                        active.encoder,
                        error
                    );
                    if !self.replace_encoder(stamped.size) {
                        return;
                    }
                }
                Err(error) => {
                    log::warn!(
                        "dropping frame {} of {}: {}",
                        active.frame_count,
                        active.path.display(),
                        error
                    );
                    return;
                }
            }
        }
    }

    // swap the active writer for the next working one of the chain; without
    // one the recording ends
    fn replace_encoder(&mut self, size: Vec2<usize>) -> bool {
        let Some(failed) = self.active.take() else {
            return false;
        };
        let _ = failed.writer.finish();
        remove_partial(&failed.path);

        match self.open_chain(failed.chain_position + 1, size, failed.started_local) {
            Ok(mut active) => {
                active.started_at = failed.started_at;
                self.last_path = Some(active.path.clone());
                self.active = Some(active);
                true
            }
            Err(reason) => {
                log::error!("recording abandoned, no encoder left: {}", reason);
                self.last_path = None;
                false
            }
        }
    }

    /// Close the file and describe it. Without an open recording this
    /// returns an all-zero summary.
    pub fn stop(&mut self) -> RecordingSummary {
        let Some(active) = self.active.take() else {
            return RecordingSummary::default();
        };

        let duration = self
            .clock
            .now()
            .saturating_duration_since(active.started_at);
        if let Err(error) = active.writer.finish() {
            log::error!("could not finalize {}: {}", active.path.display(), error);
        }
        let size_bytes = fs::metadata(&active.path).map(|m| m.len()).unwrap_or(0);
        let filename = active
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::info!(
            "recording stopped: {} ({} frames, {:.1}s, {} bytes)",
            active.path.display(),
            active.frame_count,
            duration.as_secs_f64(),
            size_bytes
        );

        RecordingSummary {
            filename,
            path: active.path,
            size_bytes,
            duration_seconds: duration.as_secs_f64(),
            frame_count: active.frame_count,
        }
    }

    pub fn status(&self) -> RecordingStatus {
        let interval = self.frame_interval().as_secs_f64();
        match &self.active {
            Some(active) => RecordingStatus {
                active: true,
                file_path: Some(active.path.clone()),
                started_at: Some(active.started_local.to_rfc3339()),
                frame_count: active.frame_count,
                duration_seconds: self
                    .clock
                    .now()
                    .saturating_duration_since(active.started_at)
                    .as_secs_f64(),
                target_frame_interval_seconds: interval,
                encoder: Some(active.encoder.clone()),
            },
            None => RecordingStatus {
                file_path: self.last_path.clone(),
                target_frame_interval_seconds: interval,
                ..Default::default()
            },
        }
    }
}

fn remove_partial(path: &Path) {
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if self.active.is_some() {
            self.stop();
        }
    }
}
