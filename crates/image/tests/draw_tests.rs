use {
    base::{Rect, Vec2},
    image::{BLACK, Image, RED, WHITE, draw_text, draw_text_outlined, fill_rect, text_size},
};

#[test]
fn test_fill_rect_clips() {
    let mut image = Image::rgb_filled(Vec2::new(10, 10), BLACK);
    fill_rect(&mut image, Rect::new(Vec2::new(8, 8), Vec2::new(5, 5)), RED).unwrap();
    assert_eq!(image.rgb_at(9, 9), Some(RED));
    assert_eq!(image.rgb_at(7, 9), Some(BLACK));
}

#[test]
fn test_fill_rect_rejects_gray() {
    let mut image = Image::gray_filled(Vec2::new(4, 4), 0);
    assert!(fill_rect(&mut image, Rect::new(Vec2::new(0, 0), Vec2::new(1, 1)), RED).is_err());
}

#[test]
fn test_text_size() {
    assert_eq!(text_size("", 2), Vec2::new(0, 0));
    assert_eq!(text_size("12:00", 1), Vec2::new(29, 7));
    assert_eq!(text_size("A", 3), Vec2::new(15, 21));
}

#[test]
fn test_draw_text_marks_pixels_inside_box() {
    let mut image = Image::rgb_filled(Vec2::new(40, 20), BLACK);
    draw_text(&mut image, Vec2::new(2, 2), "REC", 1, WHITE).unwrap();

    let size = text_size("REC", 1);
    let mut lit = 0;
    for y in 0..20 {
        for x in 0..40 {
            if image.rgb_at(x, y) == Some(WHITE) {
                lit += 1;
                assert!(x >= 2 && x < 2 + size.x && y >= 2 && y < 2 + size.y);
            }
        }
    }
    assert!(lit > 0);
    // top-left of 'R' is lit
    assert_eq!(image.rgb_at(2, 2), Some(WHITE));
}

#[test]
fn test_draw_text_off_image_is_dropped() {
    let mut image = Image::rgb_filled(Vec2::new(8, 8), BLACK);
    draw_text(&mut image, Vec2::new(6, 6), "8888", 2, WHITE).unwrap();
    assert_eq!(image.data.len(), 8 * 8 * 3);
}

#[test]
fn test_outlined_text_uses_both_colors() {
    let mut image = Image::rgb_filled(Vec2::new(30, 15), [128, 128, 128]);
    draw_text_outlined(&mut image, Vec2::new(1, 1), "88", 1, BLACK, WHITE).unwrap();
    let pixels: Vec<_> = (0..15)
        .flat_map(|y| (0..30).map(move |x| (x, y)))
        .filter_map(|(x, y)| image.rgb_at(x, y))
        .collect();
    assert!(pixels.contains(&BLACK));
    assert!(pixels.contains(&WHITE));
}
