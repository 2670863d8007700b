use crate::*;

/// Structuring element, stored as offsets from its anchor (the center).
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    offsets: Vec<(isize, isize)>,
}

impl Kernel {
    pub fn rect(width: usize, height: usize) -> Self {
        let (cx, cy) = ((width / 2) as isize, (height / 2) as isize);
        let mut offsets = Vec::with_capacity(width * height);
        for j in 0..height as isize {
            for i in 0..width as isize {
                offsets.push((i - cx, j - cy));
            }
        }
        Self { offsets }
    }

    /// Ellipse inscribed in a `width` x `height` box, rasterized row by row.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let r = (height / 2) as isize;
        let c = (width / 2) as isize;
        let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };
        let mut offsets = Vec::new();
        for i in 0..height as isize {
            let dy = i - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as isize;
            let j1 = (c - dx).max(0);
            let j2 = (c + dx + 1).min(width as isize);
            for j in j1..j2 {
                offsets.push((j - c, dy));
            }
        }
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

// out-of-bounds neighbors are skipped, so borders never grow or shrink a region
fn apply(image: &Image, kernel: &Kernel, init: u8, pick: fn(u8, u8) -> u8) -> Image {
    let (width, height) = (image.size.x as isize, image.size.y as isize);
    let mut data = vec![0u8; image.data.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = init;
            for &(dx, dy) in &kernel.offsets {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= 0 && ny >= 0 && nx < width && ny < height {
                    acc = pick(acc, image.data[(ny * width + nx) as usize]);
                }
            }
            data[(y * width + x) as usize] = acc;
        }
    }
    Image::new(image.size, data, PixelFormat::Gray8)
}

pub fn dilate(image: &Image, kernel: &Kernel, iterations: usize) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Gray8)?;
    image.validate()?;
    let mut result = image.clone();
    for _ in 0..iterations {
        result = apply(&result, kernel, 0, u8::max);
    }
    Ok(result)
}

pub fn erode(image: &Image, kernel: &Kernel, iterations: usize) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Gray8)?;
    image.validate()?;
    let mut result = image.clone();
    for _ in 0..iterations {
        result = apply(&result, kernel, 255, u8::min);
    }
    Ok(result)
}

/// Morphological closing: dilate then erode, fills small gaps between regions.
pub fn close(image: &Image, kernel: &Kernel) -> Result<Image, ImageError> {
    erode(&dilate(image, kernel, 1)?, kernel, 1)
}
