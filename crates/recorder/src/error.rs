use {base::Vec2, std::fmt};

#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    /// One encoder of the chain could not be used.
    EncoderUnavailable(String),
    /// Every encoder of the chain failed; carries the individual reasons.
    NoEncoder(String),
    Write(String),
    SizeMismatch {
        expected: Vec2<usize>,
        actual: Vec2<usize>,
    },
    Frame(image::ImageError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(err) => write!(f, "I/O error: {err}"),
            RecordError::EncoderUnavailable(msg) => write!(f, "encoder unavailable: {msg}"),
            RecordError::NoEncoder(msg) => write!(f, "no encoder could be opened: {msg}"),
            RecordError::Write(msg) => write!(f, "write error: {msg}"),
            RecordError::SizeMismatch { expected, actual } => {
                write!(f, "frame is {actual}, recording is {expected}")
            }
            RecordError::Frame(err) => write!(f, "bad frame: {err}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        RecordError::Io(err)
    }
}

impl From<image::ImageError> for RecordError {
    fn from(err: image::ImageError) -> Self {
        RecordError::Frame(err)
    }
}
