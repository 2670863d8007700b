use {crate::*, base::Vec2};

pub fn yuyv_to_rgb(size: Vec2<usize>, data: &[u8]) -> Result<Image, ImageError> {
    let expected = size.area() * 2;
    if data.len() < expected {
        return Err(ImageError::Size(format!(
            "YUYV frame of {} needs {} bytes, got {}",
            size,
            expected,
            data.len()
        )));
    }

    let mut rgb = Vec::with_capacity(size.area() * 3);
    for chunk in data[..expected].chunks_exact(4) {
        let (r0, g0, b0) = yuv_to_rgb(chunk[0], chunk[1], chunk[3]);
        let (r1, g1, b1) = yuv_to_rgb(chunk[2], chunk[1], chunk[3]);
        rgb.extend_from_slice(&[r0, g0, b0, r1, g1, b1]);
    }

    Ok(Image::new(size, rgb, PixelFormat::Rgb8))
}

pub fn jpeg_to_rgb(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory(data)
        .map_err(|e| ImageError::Decode(format!("Failed to decode JPEG: {}", e)))?;

    let rgb_image = decoded.to_rgb8();
    let (width, height) = rgb_image.dimensions();
    let size = Vec2::new(width as usize, height as usize);

    Ok(Image::new(size, rgb_image.into_raw(), PixelFormat::Rgb8))
}

/// Luma from RGB8 using BT.601 weights (fixed-point, shift 14).
pub fn rgb_to_gray(image: &Image) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Rgb8)?;
    image.validate()?;

    let gray = image
        .data
        .chunks_exact(3)
        .map(|p| ((p[0] as u32 * 4899 + p[1] as u32 * 9617 + p[2] as u32 * 1868 + 8192) >> 14) as u8)
        .collect();

    Ok(Image::new(image.size, gray, PixelFormat::Gray8))
}
