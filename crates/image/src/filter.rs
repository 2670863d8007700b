use crate::*;

// mirror an out-of-range index back into 0..n without repeating the edge pixel
fn reflect101(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

/// Normalized 1D Gaussian weights for an odd `ksize`. Sigma is derived from
/// the kernel size the same way OpenCV does when no sigma is given.
pub fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (ksize / 2) as isize;
    let weights: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Separable Gaussian blur of a Gray8 image.
pub fn gaussian_blur(image: &Image, ksize: usize) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Gray8)?;
    image.validate()?;
    if ksize % 2 == 0 {
        return Err(ImageError::Size(format!("blur kernel {ksize} is not odd")));
    }

    let kernel = gaussian_kernel(ksize);
    let half = (ksize / 2) as isize;
    let (width, height) = (image.size.x, image.size.y);

    let mut horizontal = vec![0f32; width * height];
    for y in 0..height {
        let row = &image.data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - half, width);
                acc += row[sx] as f32 * weight;
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - half, height);
                acc += horizontal[sy * width + x] * weight;
            }
            data[y * width + x] = (acc + 0.5).clamp(0.0, 255.0) as u8;
        }
    }

    Ok(Image::new(image.size, data, PixelFormat::Gray8))
}

/// Per-pixel `|a - b|` of two Gray8 images of equal size.
pub fn abs_diff(a: &Image, b: &Image) -> Result<Image, ImageError> {
    a.format.ensure_format(PixelFormat::Gray8)?;
    b.format.ensure_format(PixelFormat::Gray8)?;
    a.validate()?;
    b.validate()?;
    if a.size != b.size {
        return Err(ImageError::Size(format!(
            "cannot diff {} against {}",
            a.size, b.size
        )));
    }

    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&p, &q)| p.abs_diff(q))
        .collect();

    Ok(Image::new(a.size, data, PixelFormat::Gray8))
}

/// Binary mask: 255 where the pixel is strictly above `cutoff`, 0 elsewhere.
pub fn threshold(image: &Image, cutoff: u8) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Gray8)?;
    image.validate()?;

    let data = image
        .data
        .iter()
        .map(|&v| if v > cutoff { 255 } else { 0 })
        .collect();

    Ok(Image::new(image.size, data, PixelFormat::Gray8))
}
