use {crate::*, base::Vec2};

/// Blocking frame acquisition. All calls come from the one capture thread
/// that owns the source, so implementations may keep thread-affine handles.
pub trait FrameSource: Send {
    /// Human readable name for logs.
    fn name(&self) -> String;

    /// Open the device and return the negotiated frame size. Opening an
    /// already open source reopens it.
    fn open(&mut self) -> Result<Vec2<usize>, VideoError>;

    /// Release the device, if open.
    fn close(&mut self);

    /// Wait for and return the next frame.
    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError>;
}

/// Stand-in used when there is no capture device at all.
pub struct NullSource;

impl FrameSource for NullSource {
    fn name(&self) -> String {
        "none".to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        Err(VideoError::Unavailable("no capture device".to_string()))
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        Err(VideoError::Unavailable("no capture device".to_string()))
    }
}

/// Source over the devices listed in `config`, first working one wins.
/// Without a capture backend compiled in the list is empty and every open
/// reports `VideoError::Unavailable`.
pub fn open_default(config: &VideoConfig) -> FallbackSource {
    #[allow(unused_mut)]
    let mut candidates: Vec<Box<dyn FrameSource>> = Vec::new();

    #[cfg(feature = "v4l2")]
    for path in config.devices() {
        candidates.push(Box::new(v4l2::V4l2Source::new(path, config)));
    }

    #[cfg(not(feature = "v4l2"))]
    log::warn!(
        "built without a capture backend, ignoring {} configured device(s)",
        config.devices().count()
    );

    FallbackSource::new(candidates)
}
