use {
    base::Vec2,
    chrono::{DateTime, Local},
    image::{BLACK, Image, ImageError, WHITE, draw_text_outlined, text_size},
};

pub const STAMP_SCALE: usize = 2;
pub const STAMP_MARGIN: usize = 10;

/// Burn the date into the top-left and the time into the top-right corner.
pub fn stamp_datetime(frame: &mut Image, time: &DateTime<Local>) -> Result<(), ImageError> {
    let date = time.format("%Y/%m/%d").to_string();
    let clock = time.format("%H:%M:%S").to_string();

    draw_text_outlined(
        frame,
        Vec2::new(STAMP_MARGIN, STAMP_MARGIN),
        &date,
        STAMP_SCALE,
        WHITE,
        BLACK,
    )?;

    let width = text_size(&clock, STAMP_SCALE).x + 2;
    let x = frame.size.x.saturating_sub(width + STAMP_MARGIN);
    draw_text_outlined(
        frame,
        Vec2::new(x, STAMP_MARGIN),
        &clock,
        STAMP_SCALE,
        WHITE,
        BLACK,
    )
}
