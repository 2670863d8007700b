use crate::Vec2;

/// Axis-aligned rectangle, `origin` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    /// Exclusive bottom-right corner.
    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn contains_point(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < max.x
            && point.y < max.y
    }
}

impl Rect<usize> {
    pub fn area(&self) -> usize {
        self.size.area()
    }

    /// Width over height, 0 for a degenerate rectangle.
    pub fn aspect_ratio(&self) -> f32 {
        if self.size.y == 0 {
            0.0
        } else {
            self.size.x as f32 / self.size.y as f32
        }
    }

    /// Clip against a raster of `bounds` size.
    pub fn clipped(&self, bounds: Vec2<usize>) -> Rect<usize> {
        let min = Vec2::new(self.origin.x.min(bounds.x), self.origin.y.min(bounds.y));
        let max = self.max();
        let max = Vec2::new(max.x.min(bounds.x), max.y.min(bounds.y));
        Rect::from_min_max(min, max)
    }
}
