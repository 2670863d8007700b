use {image::Image, std::time::Instant};

/// One captured color frame, always RGB8.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub color: Image,
    pub timestamp: Instant,
}

impl VideoFrame {
    pub fn new(color: Image, timestamp: Instant) -> Self {
        Self { color, timestamp }
    }
}
