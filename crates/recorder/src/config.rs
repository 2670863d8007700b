use {
    crate::*,
    base::Vec2,
    std::path::{Path, PathBuf},
};

/// One entry of the encoder fallback chain.
#[derive(Clone, Debug, PartialEq)]
pub enum EncoderConfig {
    /// External `ffmpeg` process fed raw RGB frames over a pipe.
    Ffmpeg {
        program: PathBuf,
        codec: String,
        extension: String,
    },
    /// Built-in Motion JPEG in an AVI container; needs nothing installed.
    MjpegAvi { quality: u8 },
}

impl EncoderConfig {
    /// `codec` through the `ffmpeg` found on `PATH`.
    pub fn ffmpeg(codec: &str, extension: &str) -> Self {
        Self::ffmpeg_at("ffmpeg", codec, extension)
    }

    pub fn ffmpeg_at(program: impl Into<PathBuf>, codec: &str, extension: &str) -> Self {
        EncoderConfig::Ffmpeg {
            program: program.into(),
            codec: codec.to_string(),
            extension: extension.to_string(),
        }
    }

    /// H.264, MPEG-4 part 2, Xvid, then the built-in MJPEG writer.
    pub fn default_chain(quality: u8) -> Vec<Self> {
        vec![
            Self::ffmpeg("libx264", "mp4"),
            Self::ffmpeg("mpeg4", "mp4"),
            Self::ffmpeg("libxvid", "avi"),
            EncoderConfig::MjpegAvi { quality },
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            EncoderConfig::Ffmpeg { codec, .. } => codec,
            EncoderConfig::MjpegAvi { .. } => "mjpeg",
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            EncoderConfig::Ffmpeg { extension, .. } => extension,
            EncoderConfig::MjpegAvi { .. } => "avi",
        }
    }

    /// Open a writer for `size` frames at `fps` into `path`.
    pub fn open(
        &self,
        path: &Path,
        size: Vec2<usize>,
        fps: u32,
    ) -> Result<Box<dyn VideoWriter>, RecordError> {
        match self {
            EncoderConfig::Ffmpeg { program, codec, .. } => Ok(Box::new(FfmpegWriter::create(
                program, path, codec, size, fps,
            )?)),
            EncoderConfig::MjpegAvi { quality } => {
                Ok(Box::new(MjpegAviWriter::create(path, size, fps, *quality)?))
            }
        }
    }
}

/// Recording configuration.
#[derive(Clone, Debug)]
pub struct RecorderConfig {
    directory: PathBuf,
    target_fps: u32,
    encoders: Vec<EncoderConfig>,
}

pub const DEFAULT_JPEG_QUALITY: u8 = 85;

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("recordings"),
            target_fps: 30,
            encoders: EncoderConfig::default_chain(DEFAULT_JPEG_QUALITY),
        }
    }
}

impl RecorderConfig {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Nominal frame rate of every written file. Zero is treated as one.
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps.max(1);
        self
    }

    /// Replace the fallback chain, most preferred first.
    pub fn with_encoders(mut self, encoders: Vec<EncoderConfig>) -> Self {
        self.encoders = encoders;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn encoders(&self) -> &[EncoderConfig] {
        &self.encoders
    }
}
