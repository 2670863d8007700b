use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    Video(video::VideoError),
    Motion(motion::MotionError),
    Record(recorder::RecordError),
    Image(image::ImageError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Video(err) => write!(f, "video: {err}"),
            CaptureError::Motion(err) => write!(f, "motion: {err}"),
            CaptureError::Record(err) => write!(f, "record: {err}"),
            CaptureError::Image(err) => write!(f, "image: {err}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<video::VideoError> for CaptureError {
    fn from(err: video::VideoError) -> Self {
        CaptureError::Video(err)
    }
}

impl From<motion::MotionError> for CaptureError {
    fn from(err: motion::MotionError) -> Self {
        CaptureError::Motion(err)
    }
}

impl From<recorder::RecordError> for CaptureError {
    fn from(err: recorder::RecordError) -> Self {
        CaptureError::Record(err)
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::Image(err)
    }
}

/// Failure to hand an event to a notification collaborator.
#[derive(Debug)]
pub enum NotifyError {
    Closed,
    Delivery(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Closed => write!(f, "notification channel closed"),
            NotifyError::Delivery(msg) => write!(f, "delivery failed: {msg}"),
        }
    }
}

impl std::error::Error for NotifyError {}
