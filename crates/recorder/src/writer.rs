use {crate::*, base::Vec2, image::{Image, PixelFormat}};

/// Sink for the frames of one recording.
pub trait VideoWriter: Send {
    /// Append one RGB8 frame of the size the writer was opened with.
    fn write_frame(&mut self, frame: &Image) -> Result<(), RecordError>;

    /// Flush and close the file.
    fn finish(self: Box<Self>) -> Result<(), RecordError>;
}

pub(crate) fn check_frame(frame: &Image, expected: Vec2<usize>) -> Result<(), RecordError> {
    frame.format.ensure_format(PixelFormat::Rgb8)?;
    frame.validate()?;
    if frame.size != expected {
        return Err(RecordError::SizeMismatch {
            expected,
            actual: frame.size,
        });
    }
    Ok(())
}
