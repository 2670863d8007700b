use {
    base::{Rect, Vec2},
    chrono::{DateTime, Local},
    image::{BLACK, GREEN, Image, ImageError, RED, WHITE, draw_text, fill_rect, text_size},
    recorder::stamp_datetime,
};

const BADGE_SCALE: usize = 2;
const BADGE_SIZE: Vec2<usize> = Vec2 { x: 200, y: 30 };
pub const MOTION_BADGE: Rect<usize> = Rect {
    origin: Vec2 { x: 10, y: 34 },
    size: BADGE_SIZE,
};
pub const RECORDING_BADGE: Rect<usize> = Rect {
    origin: Vec2 { x: 10, y: 70 },
    size: BADGE_SIZE,
};

/// Why there is no camera picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    NoCamera,
    CameraError,
}

impl Placeholder {
    pub fn message(&self) -> &'static str {
        match self {
            Placeholder::NoCamera => "NO CAMERA",
            Placeholder::CameraError => "CAMERA ERROR",
        }
    }

    pub fn color(&self) -> [u8; 3] {
        match self {
            Placeholder::NoCamera => WHITE,
            Placeholder::CameraError => RED,
        }
    }
}

fn badge(frame: &mut Image, rect: Rect<usize>, color: [u8; 3], label: &str) -> Result<(), ImageError> {
    fill_rect(frame, rect, color)?;
    let text = text_size(label, BADGE_SCALE);
    let origin = rect.origin
        + Vec2::new(
            rect.size.x.saturating_sub(text.x) / 2,
            rect.size.y.saturating_sub(text.y) / 2,
        );
    draw_text(frame, origin, label, BADGE_SCALE, WHITE)
}

/// Status badges and the current date and time, drawn over a display frame.
pub fn draw_overlay(
    frame: &mut Image,
    motion: bool,
    recording: bool,
    time: &DateTime<Local>,
) -> Result<(), ImageError> {
    if motion {
        badge(frame, MOTION_BADGE, RED, "MOTION DETECTED")?;
    }
    if recording {
        badge(frame, RECORDING_BADGE, GREEN, "RECORDING")?;
    }
    stamp_datetime(frame, time)
}

/// Black frame carrying the reason there is no picture.
pub fn placeholder_frame(kind: Placeholder, size: Vec2<usize>, time: &DateTime<Local>) -> Image {
    let mut frame = Image::rgb_filled(size, BLACK);
    let origin = Vec2::new(50.min(size.x), size.y / 2);
    // drawing on a fresh RGB8 frame only fails for an empty size
    let _ = draw_text(&mut frame, origin, kind.message(), 3, kind.color());
    let _ = stamp_datetime(&mut frame, time);
    frame
}
