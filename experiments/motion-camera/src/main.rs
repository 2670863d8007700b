use {
    anyhow::Context,
    base::{SystemClock, init_stdout_logger},
    capture::{CaptureConfig, CaptureService, ChannelNotifier, RecordingEvent, SourceFactory},
    image::encode_jpeg,
    recorder::RecorderConfig,
    std::{path::PathBuf, sync::Arc, time::Duration},
    tokio::time::interval,
    video::{FrameSource, VideoConfig, open_default},
};

const STATUS_INTERVAL: Duration = Duration::from_secs(5);
const PREVIEW_NAME: &str = "latest.jpg";
const PREVIEW_QUALITY: u8 = 80;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_stdout_logger();

    // motion-camera [RECORDINGS_DIR] [DEVICE...]
    let mut args = std::env::args().skip(1);
    let directory = PathBuf::from(args.next().unwrap_or_else(|| "recordings".to_string()));
    let devices: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let mut video_config = VideoConfig::default();
    if !devices.is_empty() {
        video_config = video_config.with_devices(devices);
    }
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("cannot create {}", directory.display()))?;

    let config = CaptureConfig::default()
        .with_recorder(RecorderConfig::default().with_directory(&directory));
    let factory: SourceFactory =
        Arc::new(move || Box::new(open_default(&video_config)) as Box<dyn FrameSource>);
    let (notifier, mut events) = ChannelNotifier::channel();
    let service = CaptureService::new(config, factory, Arc::new(notifier), Arc::new(SystemClock));

    log::info!("recording into {}", directory.display());
    service.start_capture().await;

    let preview = directory.join(PREVIEW_NAME);
    let mut ticker = interval(STATUS_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(event) = events.recv() => match event {
                RecordingEvent::Finished(summary) => log::info!(
                    "saved {} ({} frames, {:.1}s, {} bytes)",
                    summary.filename,
                    summary.frame_count,
                    summary.duration_seconds,
                    summary.size_bytes
                ),
                RecordingEvent::EncoderUnavailable { reason } => {
                    log::error!("recording is not possible: {}", reason)
                }
            },
            _ = ticker.tick() => {
                let status = service.motion_status();
                log::info!(
                    "{:?}: motion {}, recording {}, warm-up {}/{}",
                    status.phase,
                    status.motion_detected,
                    status.recording.active,
                    status.initialization_progress,
                    status.initialization_required
                );
                match encode_jpeg(&service.get_frame(), PREVIEW_QUALITY) {
                    Ok(jpeg) => {
                        if let Err(error) = tokio::fs::write(&preview, jpeg).await {
                            log::warn!("cannot write {}: {}", preview.display(), error);
                        }
                    }
                    Err(error) => log::warn!("cannot encode preview: {}", error),
                }
            }
        }
    }

    log::info!("shutting down");
    service.stop_capture().await;
    while let Ok(RecordingEvent::Finished(summary)) = events.try_recv() {
        log::info!("saved {}", summary.filename);
    }
    Ok(())
}
