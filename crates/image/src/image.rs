use {crate::*, base::Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// RGB8 image with every pixel set to `color`.
    pub fn rgb_filled(size: Vec2<usize>, color: [u8; 3]) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(size.area() * 3)
            .collect();
        Self::new(size, data, PixelFormat::Rgb8)
    }

    /// Gray8 image with every pixel set to `value`.
    pub fn gray_filled(size: Vec2<usize>, value: u8) -> Self {
        Self::new(size, vec![value; size.area()], PixelFormat::Gray8)
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Check that the buffer length matches size and format.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(ImageError::Size(format!("empty image {}", self.size)));
        }
        match self.format.frame_len(self.size) {
            Some(expected) if expected != self.data.len() => Err(ImageError::Size(format!(
                "{:?} image of {} needs {} bytes, got {}",
                self.format,
                self.size,
                expected,
                self.data.len()
            ))),
            _ => Ok(()),
        }
    }

    /// RGB value at `(x, y)`, `None` outside the image or for non-RGB8 images.
    pub fn rgb_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if self.format != PixelFormat::Rgb8 || x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        self.data.get(i..i + 3).map(|p| [p[0], p[1], p[2]])
    }
}
