use std::fmt;

#[derive(Debug)]
pub enum MotionError {
    Preprocess(image::ImageError),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Preprocess(err) => write!(f, "preprocess error: {err}"),
        }
    }
}

impl std::error::Error for MotionError {}

impl From<image::ImageError> for MotionError {
    fn from(err: image::ImageError) -> Self {
        MotionError::Preprocess(err)
    }
}
