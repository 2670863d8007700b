use {
    base::{ManualClock, Vec2},
    image::{Image, PixelFormat},
    motion::{MotionDetector, MotionSettings, WARMUP_FRAMES},
    std::{sync::Arc, time::Duration},
};

const SIZE: Vec2<usize> = Vec2 { x: 320, y: 240 };
const A: (usize, usize) = (40, 40);
const B: (usize, usize) = (200, 120);

fn blank() -> Image {
    Image::rgb_filled(SIZE, [0, 0, 0])
}

fn square(origin: (usize, usize), side: Vec2<usize>, value: u8) -> Image {
    let mut image = blank();
    for y in origin.1..origin.1 + side.y {
        for x in origin.0..origin.0 + side.x {
            let i = (y * SIZE.x + x) * 3;
            image.data[i..i + 3].copy_from_slice(&[value, value, value]);
        }
    }
    image
}

fn white_square(origin: (usize, usize)) -> Image {
    square(origin, Vec2::new(60, 60), 255)
}

fn detector() -> (MotionDetector, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (
        MotionDetector::new(MotionSettings::default(), clock.clone()),
        clock,
    )
}

fn warm_up(detector: &mut MotionDetector) {
    for _ in 0..WARMUP_FRAMES {
        assert!(!detector.classify(&blank()));
    }
}

#[test]
fn test_warmup_never_reports_motion() {
    let (mut detector, _clock) = detector();
    for i in 0..WARMUP_FRAMES {
        assert!(detector.is_initializing());
        // wildly different frames every time
        let frame = if i % 2 == 0 { blank() } else { white_square(A) };
        assert!(!detector.classify(&frame));
        assert_eq!(detector.state().initialization_count, i + 1);
    }
    assert!(!detector.is_initializing());
    assert!(!detector.detected());
}

#[test]
fn test_identical_frames_never_register() {
    let (mut detector, _clock) = detector();
    warm_up(&mut detector);
    for _ in 0..20 {
        assert!(!detector.classify(&blank()));
        assert_eq!(detector.last_area(), 0);
    }
}

#[test]
fn test_square_scenario_triggers_once() {
    let (mut detector, _clock) = detector();
    warm_up(&mut detector);
    for _ in 0..5 {
        assert!(!detector.classify(&blank()));
    }

    let mut transitions = 0;
    let mut previous = false;
    for _ in 0..5 {
        let detected = detector.classify(&white_square(A));
        if detected && !previous {
            transitions += 1;
        }
        previous = detected;
    }
    assert_eq!(transitions, 1);
    assert!(detector.detected());
    assert!(detector.state().motion_started_at.is_some());
}

#[test]
fn test_small_and_thin_changes_are_ignored() {
    let (mut detector, _clock) = detector();
    warm_up(&mut detector);
    assert!(!detector.classify(&square((100, 100), Vec2::new(20, 20), 255)));
    assert!(!detector.classify(&blank()));
    assert!(!detector.classify(&square((10, 100), Vec2::new(300, 12), 255)));
    assert!(!detector.classify(&blank()));
    assert!(!detector.detected());
}

#[test]
fn test_cooldown_measured_from_first_quiet_frame() {
    let (mut detector, clock) = detector();
    warm_up(&mut detector);
    assert!(detector.classify(&white_square(A)));

    // the square stays put, so every following frame is quiet
    let still = white_square(A);
    clock.advance(Duration::from_secs(1));
    assert!(detector.classify(&still)); // cooldown starts here
    for _ in 0..3 {
        clock.advance(Duration::from_secs(1));
        assert!(detector.classify(&still));
    }
    clock.advance(Duration::from_millis(100));
    assert!(!detector.classify(&still));
    assert_eq!(detector.state().motion_ended_at, None);
    assert_eq!(detector.state().motion_started_at, None);
}

#[test]
fn test_motion_during_cooldown_restarts_it() {
    let (mut detector, clock) = detector();
    warm_up(&mut detector);
    assert!(detector.classify(&white_square(A)));

    clock.advance(Duration::from_secs(1));
    assert!(detector.classify(&white_square(A)));
    clock.advance(Duration::from_secs(2));
    assert!(detector.classify(&white_square(A)));
    assert!(detector.state().motion_ended_at.is_some());

    // the square jumps, which is motion again
    clock.advance(Duration::from_millis(500));
    assert!(detector.classify(&white_square(B)));
    assert_eq!(detector.state().motion_ended_at, None);

    // a fresh full cooldown is needed now
    clock.advance(Duration::from_secs(1));
    assert!(detector.classify(&white_square(B)));
    clock.advance(Duration::from_secs(3));
    assert!(detector.classify(&white_square(B)));
    clock.advance(Duration::from_millis(1));
    assert!(!detector.classify(&white_square(B)));
}

#[test]
fn test_threshold_setting_applies_to_next_frame() {
    let dim = square((100, 80), Vec2::new(80, 80), 80);

    let (mut detector, _clock) = detector();
    warm_up(&mut detector);
    detector.apply_settings(MotionSettings::default().with_threshold(100));
    assert!(!detector.classify(&dim));
    assert!(!detector.classify(&blank()));

    detector.apply_settings(MotionSettings::default());
    assert!(detector.classify(&dim));
}

#[test]
fn test_invalid_frame_keeps_reference() {
    let (mut detector, _clock) = detector();
    warm_up(&mut detector);

    let broken = Image::new(SIZE, vec![0; 10], PixelFormat::Rgb8);
    assert!(!detector.classify(&broken));
    let gray = Image::gray_filled(SIZE, 255);
    assert!(!detector.classify(&gray));

    // still compared against the blank reference
    assert!(detector.classify(&white_square(A)));
}

#[test]
fn test_size_change_reseeds_reference() {
    let (mut detector, _clock) = detector();
    warm_up(&mut detector);

    let small = Image::rgb_filled(Vec2::new(160, 120), [255, 255, 255]);
    assert!(!detector.classify(&small));
    assert!(!detector.classify(&small));
    assert!(!detector.detected());
}
