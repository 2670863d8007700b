use {
    crate::*,
    base::{Rect, Vec2},
    std::collections::VecDeque,
};

/// Connected foreground area of a binary mask, as bounded by its outer contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub bounds: Rect<usize>,
    /// Pixels enclosed by the outer contour, holes included.
    pub pixel_count: usize,
}

// background reachable from the border through 4-connected background pixels
fn outside_mask(image: &Image) -> Vec<bool> {
    let (width, height) = (image.size.x, image.size.y);
    let mut outside = vec![false; width * height];
    let mut queue = VecDeque::new();

    let seed = |x: usize, y: usize, outside: &mut Vec<bool>, queue: &mut VecDeque<(usize, usize)>| {
        let i = y * width + x;
        if image.data[i] == 0 && !outside[i] {
            outside[i] = true;
            queue.push_back((x, y));
        }
    };
    for x in 0..width {
        seed(x, 0, &mut outside, &mut queue);
        seed(x, height - 1, &mut outside, &mut queue);
    }
    for y in 0..height {
        seed(0, y, &mut outside, &mut queue);
        seed(width - 1, y, &mut outside, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx < width && ny < height {
                seed(nx, ny, &mut outside, &mut queue);
            }
        }
    }

    outside
}

/// Regions bounded by the external contours of a binary Gray8 mask.
///
/// Foreground is any non-zero pixel, connected through its 8 neighbors.
/// Holes are filled first, so a region nested inside another region's hole
/// is not reported separately. Regions come out in raster order of their
/// first pixel.
pub fn external_regions(mask: &Image) -> Result<Vec<Region>, ImageError> {
    mask.format.ensure_format(PixelFormat::Gray8)?;
    mask.validate()?;

    let (width, height) = (mask.size.x, mask.size.y);
    let outside = outside_mask(mask);
    let mut visited = vec![false; width * height];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for start in 0..width * height {
        if outside[start] || visited[start] {
            continue;
        }

        visited[start] = true;
        stack.push(start);
        let mut min = Vec2::new(usize::MAX, usize::MAX);
        let mut max = Vec2::new(0, 0);
        let mut pixel_count = 0;

        while let Some(i) = stack.pop() {
            let (x, y) = (i % width, i / width);
            pixel_count += 1;
            min = Vec2::new(min.x.min(x), min.y.min(y));
            max = Vec2::new(max.x.max(x), max.y.max(y));

            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let (nx, ny) = (x as isize + dx, y as isize + dy);
                    if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                        continue;
                    }
                    let n = ny as usize * width + nx as usize;
                    if !outside[n] && !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }

        regions.push(Region {
            bounds: Rect::from_min_max(min, max + Vec2::new(1, 1)),
            pixel_count,
        });
    }

    Ok(regions)
}
