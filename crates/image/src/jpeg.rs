use {crate::*, crates_image::ImageEncoder};

/// Encode an RGB8 or Gray8 image as JPEG.
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    image.validate()?;
    let color_type = match image.format {
        PixelFormat::Rgb8 => crates_image::ExtendedColorType::Rgb8,
        PixelFormat::Gray8 => crates_image::ExtendedColorType::L8,
        other => {
            return Err(ImageError::Encode(format!(
                "cannot encode {:?} as JPEG",
                other
            )));
        }
    };

    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &image.data,
            image.size.x as u32,
            image.size.y as u32,
            color_type,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(buffer)
}
