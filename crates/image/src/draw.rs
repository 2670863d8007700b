use {
    crate::{
        font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph},
        *,
    },
    base::{Rect, Vec2},
};

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 200, 0];

fn put_pixel(image: &mut Image, x: usize, y: usize, color: [u8; 3]) {
    if x < image.size.x && y < image.size.y {
        let i = (y * image.size.x + x) * 3;
        image.data[i..i + 3].copy_from_slice(&color);
    }
}

fn ensure_drawable(image: &Image) -> Result<(), ImageError> {
    image.format.ensure_format(PixelFormat::Rgb8)?;
    image.validate()
}

/// Fill `rect` (clipped to the image) with a solid color.
pub fn fill_rect(image: &mut Image, rect: Rect<usize>, color: [u8; 3]) -> Result<(), ImageError> {
    ensure_drawable(image)?;
    let rect = rect.clipped(image.size);
    let max = rect.max();
    for y in rect.origin.y..max.y {
        for x in rect.origin.x..max.x {
            put_pixel(image, x, y, color);
        }
    }
    Ok(())
}

/// Pixel size of `text` drawn at `scale`.
pub fn text_size(text: &str, scale: usize) -> Vec2<usize> {
    let chars = text.chars().count();
    if chars == 0 {
        return Vec2::zero();
    }
    Vec2::new(
        (chars * GLYPH_ADVANCE - 1) * scale,
        GLYPH_HEIGHT * scale,
    )
}

/// Draw `text` with its top-left corner at `origin`. Pixels falling outside
/// the image are dropped.
pub fn draw_text(
    image: &mut Image,
    origin: Vec2<usize>,
    text: &str,
    scale: usize,
    color: [u8; 3],
) -> Result<(), ImageError> {
    ensure_drawable(image)?;
    for (index, c) in text.chars().enumerate() {
        let rows = glyph(c);
        let left = origin.x + index * GLYPH_ADVANCE * scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(
                            image,
                            left + col * scale + sx,
                            origin.y + row * scale + sy,
                            color,
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

/// Draw `text` in `color` surrounded by a one pixel `outline`, readable on any
/// background. Occupies `text_size(text, scale)` plus two pixels each way.
pub fn draw_text_outlined(
    image: &mut Image,
    origin: Vec2<usize>,
    text: &str,
    scale: usize,
    color: [u8; 3],
    outline: [u8; 3],
) -> Result<(), ImageError> {
    for dy in 0..3 {
        for dx in 0..3 {
            if dx != 1 || dy != 1 {
                draw_text(image, origin + Vec2::new(dx, dy), text, scale, outline)?;
            }
        }
    }
    draw_text(image, origin + Vec2::new(1, 1), text, scale, color)
}
