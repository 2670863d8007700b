use {
    base::{ManualClock, Vec2},
    chrono::{Local, TimeZone},
    image::{Image, jpeg_to_rgb},
    recorder::{
        EncoderConfig, RecordError, RecorderConfig, RecordingSession, RecordingSummary,
        avi_frame_count, stamp_datetime,
    },
    std::{
        fs,
        path::{Path, PathBuf},
        sync::Arc,
        time::Duration,
    },
};

const SIZE: Vec2<usize> = Vec2 { x: 64, y: 48 };

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(
        Local.with_ymd_and_hms(2026, 3, 7, 12, 4, 5).single().unwrap(),
    ))
}

fn mjpeg_config(dir: &Path) -> RecorderConfig {
    RecorderConfig::default()
        .with_directory(dir)
        .with_target_fps(30)
        .with_encoders(vec![EncoderConfig::MjpegAvi { quality: 85 }])
}

fn frame() -> Image {
    Image::rgb_filled(SIZE, [40, 80, 120])
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_default_config() {
    let config = RecorderConfig::default();
    assert_eq!(config.directory(), Path::new("recordings"));
    assert_eq!(config.target_fps(), 30);
    let names: Vec<&str> = config.encoders().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["libx264", "mpeg4", "libxvid", "mjpeg"]);
    assert_eq!(config.encoders()[3].extension(), "avi");
}

#[test]
fn test_stop_without_start_is_zero_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock());
    assert_eq!(session.stop(), RecordingSummary::default());
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn test_records_at_target_rate() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock.clone());

    session.start(&frame()).unwrap();
    assert!(session.is_active());
    // frames arrive every 10ms, three times faster than the target rate
    for _ in 0..90 {
        session.append(&frame());
        clock.advance(Duration::from_millis(10));
    }
    let summary = session.stop();

    assert_eq!(summary.filename, "motion_20260307_120405.avi");
    assert_eq!(summary.frame_count, 90);
    assert!(summary.size_bytes > 0);
    assert_eq!(avi_frame_count(&summary.path).unwrap(), 90);

    let nominal = summary.frame_count as f64 / 30.0;
    let error = (nominal - summary.duration_seconds).abs() / summary.duration_seconds;
    assert!(error < 0.05, "nominal {nominal}s vs {}s", summary.duration_seconds);
}

#[test]
fn test_first_frame_is_not_delayed() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock.clone());
    session.start(&frame()).unwrap();

    let before = clock.elapsed();
    session.append(&frame());
    assert_eq!(clock.elapsed(), before);

    // the second one waits out the interval
    session.append(&frame());
    assert!(clock.elapsed() - before >= Duration::from_millis(33));
    session.stop();
}

// JPEG payloads of the 00dc chunks, in file order
fn avi_frames(path: &Path) -> Vec<Vec<u8>> {
    let bytes = fs::read(path).unwrap();
    let mut frames = Vec::new();
    let mut pos = 224;
    while pos + 8 <= bytes.len() && &bytes[pos..pos + 4] == b"00dc" {
        let len = u32::from_le_bytes(bytes[pos + 4..pos + 8].try_into().unwrap()) as usize;
        frames.push(bytes[pos + 8..pos + 8 + len].to_vec());
        pos += 8 + len + len % 2;
    }
    frames
}

fn distance(a: &Image, b: &Image) -> u64 {
    a.data
        .iter()
        .zip(&b.data)
        .map(|(x, y)| (*x as i64 - *y as i64).unsigned_abs())
        .sum()
}

#[test]
fn test_stamp_shows_time_of_write() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock.clone());
    let size = Vec2::new(320, 240);
    let plain = Image::rgb_filled(size, [40, 80, 120]);

    session.start(&plain).unwrap();
    clock.advance(Duration::from_millis(980));
    session.append(&plain);
    // paced to 12:04:06.013, so the second frame carries the new second
    session.append(&plain);
    let summary = session.stop();

    let frames = avi_frames(&summary.path);
    assert_eq!(frames.len(), 2);
    let written = jpeg_to_rgb(&frames[1]).unwrap();

    let stamped_at = |second| {
        let mut image = plain.clone();
        let time = Local.with_ymd_and_hms(2026, 3, 7, 12, 4, second).single().unwrap();
        stamp_datetime(&mut image, &time).unwrap();
        image
    };
    assert!(distance(&written, &stamped_at(6)) < distance(&written, &stamped_at(5)));
}

#[test]
fn test_double_start_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock());
    session.start(&frame()).unwrap();
    session.append(&frame());
    let path = session.status().file_path.unwrap();

    session.start(&frame()).unwrap();
    let status = session.status();
    assert_eq!(status.file_path.as_ref(), Some(&path));
    assert_eq!(status.frame_count, 1);
    assert_eq!(files_in(dir.path()).len(), 1);

    let summary = session.stop();
    assert_eq!(summary.path, path);
    assert_eq!(avi_frame_count(&path).unwrap(), 1);
}

#[test]
fn test_same_second_gets_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock());
    session.start(&frame()).unwrap();
    let first = session.stop();
    session.start(&frame()).unwrap();
    let second = session.stop();

    assert_ne!(first.path, second.path);
    assert_eq!(second.filename, "motion_20260307_120405_1.avi");
}

#[test]
fn test_falls_back_past_missing_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let config = mjpeg_config(dir.path()).with_encoders(vec![
        EncoderConfig::ffmpeg("no-such-codec", "mkv"),
        EncoderConfig::MjpegAvi { quality: 85 },
    ]);
    let mut session = RecordingSession::new(config, clock());
    session.start(&frame()).unwrap();
    assert_eq!(session.status().encoder.as_deref(), Some("mjpeg"));
    session.stop();
    assert_eq!(files_in(dir.path()), vec!["motion_20260307_120405.avi"]);
}

#[test]
fn test_no_working_encoder_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let config =
        mjpeg_config(dir.path()).with_encoders(vec![EncoderConfig::ffmpeg("no-such-codec", "mkv")]);
    let mut session = RecordingSession::new(config, clock());

    assert!(matches!(
        session.start(&frame()),
        Err(RecordError::NoEncoder(_))
    ));
    assert!(!session.is_active());
    session.append(&frame());
    assert_eq!(session.stop(), RecordingSummary::default());
    assert!(files_in(dir.path()).is_empty());

    let mut empty = RecordingSession::new(mjpeg_config(dir.path()).with_encoders(Vec::new()), clock());
    assert!(matches!(empty.start(&frame()), Err(RecordError::NoEncoder(_))));
}

#[test]
fn test_bad_frames_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock());
    session.start(&frame()).unwrap();
    session.append(&frame());
    session.append(&Image::rgb_filled(Vec2::new(32, 24), [0, 0, 0]));
    session.append(&frame());
    assert!(session.is_active());

    let summary = session.stop();
    assert_eq!(summary.frame_count, 2);
    assert_eq!(avi_frame_count(&summary.path).unwrap(), 2);
}

#[test]
fn test_status_keeps_last_path() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();
    let mut session = RecordingSession::new(mjpeg_config(dir.path()), clock.clone());
    let idle = session.status();
    assert!(!idle.active);
    assert_eq!(idle.file_path, None);
    assert!((idle.target_frame_interval_seconds - 1.0 / 30.0).abs() < 1e-9);

    session.start(&frame()).unwrap();
    clock.advance(Duration::from_secs(2));
    let recording = session.status();
    assert!(recording.active);
    assert_eq!(recording.duration_seconds, 2.0);
    assert!(recording.started_at.unwrap().starts_with("2026-03-07T12:04:05"));

    let summary = session.stop();
    let stopped = session.status();
    assert!(!stopped.active);
    assert_eq!(stopped.file_path, Some(summary.path));
}

#[test]
fn test_summary_serializes_camel_case() {
    let summary = RecordingSummary {
        filename: "motion_20260307_120405.avi".to_string(),
        size_bytes: 1024,
        duration_seconds: 1.5,
        ..Default::default()
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["filename"], "motion_20260307_120405.avi");
    assert_eq!(json["sizeBytes"], 1024);
    assert_eq!(json["durationSeconds"], 1.5);
}

// stand-in for ffmpeg that lists libx264 and mpeg4; `test_encode` decides
// whether the one-frame test encode succeeds, real recordings always fail
#[cfg(unix)]
fn fake_ffmpeg(dir: &Path, test_encode: bool) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg");
    let lavfi = if test_encode { "exit 0" } else { "exit 1" };
    let script = format!(
        "#!/bin/sh\n\
         case \"$*\" in\n\
         *-encoders*) printf ' V....D libx264 H.264\\n V....D mpeg4 MPEG-4\\n'; exit 0 ;;\n\
         *lavfi*) {lavfi} ;;\n\
         esac\n\
         echo 'width not divisible by 2' >&2\n\
         exit 1\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn fake_chain(program: &Path) -> Vec<EncoderConfig> {
    vec![
        EncoderConfig::ffmpeg_at(program, "libx264", "mp4"),
        EncoderConfig::ffmpeg_at(program, "mpeg4", "mp4"),
        EncoderConfig::MjpegAvi { quality: 85 },
    ]
}

#[cfg(unix)]
#[test]
fn test_skips_ffmpeg_codec_that_cannot_encode() {
    let tools = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let program = fake_ffmpeg(tools.path(), false);
    let config = mjpeg_config(dir.path()).with_encoders(fake_chain(&program));
    let mut session = RecordingSession::new(config, clock());

    let odd = Image::rgb_filled(Vec2::new(321, 241), [90, 90, 90]);
    session.start(&odd).unwrap();
    assert_eq!(session.status().encoder.as_deref(), Some("mjpeg"));
    for _ in 0..10 {
        session.append(&odd);
    }
    let summary = session.stop();

    assert_eq!(summary.frame_count, 10);
    assert!(summary.size_bytes > 0);
    assert_eq!(files_in(dir.path()), vec!["motion_20260307_120405.avi"]);
    assert_eq!(avi_frame_count(&summary.path).unwrap(), 10);
}

#[cfg(unix)]
#[test]
fn test_replaces_encoder_failing_on_first_frame() {
    let tools = tempfile::tempdir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let program = fake_ffmpeg(tools.path(), true);
    let config = mjpeg_config(dir.path()).with_encoders(fake_chain(&program));
    let mut session = RecordingSession::new(config, clock());

    let odd = Image::rgb_filled(Vec2::new(321, 241), [90, 90, 90]);
    session.start(&odd).unwrap();
    assert_eq!(session.status().encoder.as_deref(), Some("libx264"));
    for _ in 0..10 {
        session.append(&odd);
    }
    assert_eq!(session.status().encoder.as_deref(), Some("mjpeg"));
    let summary = session.stop();

    assert_eq!(summary.frame_count, 10);
    assert_eq!(summary.filename, "motion_20260307_120405.avi");
    assert_eq!(files_in(dir.path()), vec!["motion_20260307_120405.avi"]);
    assert_eq!(avi_frame_count(&summary.path).unwrap(), 10);
}
