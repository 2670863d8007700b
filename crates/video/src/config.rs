use std::path::{Path, PathBuf};

/// Capture device configuration.
#[derive(Clone, Debug)]
pub struct VideoConfig {
    devices: Vec<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            devices: vec![PathBuf::from("/dev/video0"), PathBuf::from("/dev/video1")],
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
        }
    }
}

impl VideoConfig {
    /// Replace the candidate device list; devices are tried in order.
    pub fn with_devices(mut self, devices: Vec<PathBuf>) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn devices(&self) -> impl Iterator<Item = &Path> {
        self.devices.iter().map(PathBuf::as_path)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}
