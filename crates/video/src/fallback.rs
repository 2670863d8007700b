use {crate::*, base::Vec2};

/// Tries each candidate in order; a candidate counts as working once it
/// opens and delivers a test frame.
pub struct FallbackSource {
    candidates: Vec<Box<dyn FrameSource>>,
    active: Option<usize>,
}

impl FallbackSource {
    pub fn new(candidates: Vec<Box<dyn FrameSource>>) -> Self {
        Self {
            candidates,
            active: None,
        }
    }

    /// Index of the candidate currently in use.
    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

impl FrameSource for FallbackSource {
    fn name(&self) -> String {
        match self.active {
            Some(index) => self.candidates[index].name(),
            None => "fallback (closed)".to_string(),
        }
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        self.close();

        for (index, candidate) in self.candidates.iter_mut().enumerate() {
            log::info!("trying capture device {}", candidate.name());
            let size = match candidate.open() {
                Ok(size) => size,
                Err(error) => {
                    log::warn!("could not open {}: {}", candidate.name(), error);
                    continue;
                }
            };
            match candidate.blocking_capture() {
                Ok(_) => {
                    log::info!("opened {} at {}", candidate.name(), size);
                    self.active = Some(index);
                    return Ok(size);
                }
                Err(error) => {
                    log::warn!("test frame from {} failed: {}", candidate.name(), error);
                    candidate.close();
                }
            }
        }

        Err(VideoError::Unavailable(format!(
            "none of {} capture device(s) could be opened",
            self.candidates.len()
        )))
    }

    fn close(&mut self) {
        if let Some(index) = self.active.take() {
            self.candidates[index].close();
        }
    }

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        match self.active {
            Some(index) => self.candidates[index].blocking_capture(),
            None => Err(VideoError::Unavailable("capture device not open".to_string())),
        }
    }
}
