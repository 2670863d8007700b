#![allow(dead_code)]

use {
    base::Vec2,
    capture::{Notifier, NotifyError, RecordingEvent},
    image::Image,
    recorder::{EncoderConfig, RecorderConfig},
    std::{
        path::Path,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::{Duration, Instant},
    },
    video::{FrameSource, VideoError, VideoFrame},
};

pub const SIZE: Vec2<usize> = Vec2 { x: 320, y: 240 };
pub const A: (usize, usize) = (40, 40);
pub const B: (usize, usize) = (200, 120);

pub fn blank() -> Image {
    Image::rgb_filled(SIZE, [0, 0, 0])
}

/// Blank frame with a 60x60 white square at `origin`.
pub fn square(origin: (usize, usize)) -> Image {
    let mut image = blank();
    for y in origin.1..origin.1 + 60 {
        for x in origin.0..origin.0 + 60 {
            let i = (y * SIZE.x + x) * 3;
            image.data[i..i + 3].copy_from_slice(&[255, 255, 255]);
        }
    }
    image
}

pub fn mjpeg_recorder(dir: &Path) -> RecorderConfig {
    RecorderConfig::default()
        .with_directory(dir)
        .with_target_fps(30)
        .with_encoders(vec![EncoderConfig::MjpegAvi { quality: 85 }])
}

/// Serves whatever frame the test put in `next`.
pub struct SharedSource {
    pub next: Arc<Mutex<Image>>,
    pub opens: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl SharedSource {
    pub fn new(frame: Image) -> (Self, Arc<Mutex<Image>>, Arc<AtomicUsize>) {
        let next = Arc::new(Mutex::new(frame));
        let opens = Arc::new(AtomicUsize::new(0));
        (
            Self {
                next: Arc::clone(&next),
                opens: Arc::clone(&opens),
                delay: Duration::ZERO,
            },
            next,
            opens,
        )
    }
}

impl FrameSource for SharedSource {
    fn name(&self) -> String {
        "shared".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(SIZE)
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let frame = self.next.lock().unwrap().clone();
        Ok(VideoFrame::new(frame, Instant::now()))
    }
}

/// Alternates between two square positions, so every frame is motion.
pub struct MovingSource {
    pub count: usize,
    pub delay: Duration,
}

impl FrameSource for MovingSource {
    fn name(&self) -> String {
        "moving".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        Ok(SIZE)
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        std::thread::sleep(self.delay);
        self.count += 1;
        let frame = if self.count % 2 == 0 { square(A) } else { square(B) };
        Ok(VideoFrame::new(frame, Instant::now()))
    }
}

/// Opens fine but every capture fails.
pub struct BrokenSource {
    pub opens: Arc<AtomicUsize>,
}

impl FrameSource for BrokenSource {
    fn name(&self) -> String {
        "broken".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(SIZE)
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        Err(VideoError::Stream("select timeout".to_string()))
    }
}

/// Counts open attempts and never opens.
pub struct AbsentSource {
    pub opens: Arc<AtomicUsize>,
}

impl FrameSource for AbsentSource {
    fn name(&self) -> String {
        "absent".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Err(VideoError::Unavailable("no device".to_string()))
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        Err(VideoError::Unavailable("no device".to_string()))
    }
}

/// Opens fine and panics on capture.
pub struct PanickingSource;

impl FrameSource for PanickingSource {
    fn name(&self) -> String {
        "panicking".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        Ok(SIZE)
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        panic!("driver exploded");
    }
}

/// Rejects every event.
pub struct FailingNotifier {
    pub calls: AtomicUsize,
}

impl Notifier for FailingNotifier {
    fn notify(&self, _event: &RecordingEvent) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Delivery("webhook down".to_string()))
    }
}

pub fn has_color(image: &Image, color: [u8; 3], x0: usize, x1: usize, y0: usize, y1: usize) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| image.rgb_at(x, y) == Some(color)))
}
