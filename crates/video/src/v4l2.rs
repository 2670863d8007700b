use {
    crate::*,
    base::Vec2,
    image::{jpeg_to_rgb, yuyv_to_rgb},
    std::{
        path::{Path, PathBuf},
        time::Instant,
    },
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireFormat {
    Yuyv,
    Mjpeg,
}

/// Video4Linux2 capture device. Frames arrive as YUYV or MJPEG and are
/// converted to RGB8 before they leave the source.
pub struct V4l2Source {
    path: PathBuf,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
    stream: Option<MmapStream<'static>>,
    size: Vec2<usize>,
    format: WireFormat,
}

impl V4l2Source {
    pub fn new(path: &Path, config: &VideoConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            width: config.width(),
            height: config.height(),
            fps: config.fps(),
            buffer_count: config.buffer_count(),
            stream: None,
            size: Vec2::zero(),
            format: WireFormat::Yuyv,
        }
    }
}

impl FrameSource for V4l2Source {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&mut self) -> Result<Vec2<usize>, VideoError> {
        self.stream.take();

        let device = Device::with_path(&self.path)?;

        // prefer YUYV, fall back to MJPEG when the driver refuses it
        let mut actual = Capture::set_format(
            &device,
            &Format::new(self.width, self.height, FourCC::new(b"YUYV")),
        )?;
        if &actual.fourcc.repr != b"YUYV" {
            actual = Capture::set_format(
                &device,
                &Format::new(self.width, self.height, FourCC::new(b"MJPG")),
            )?;
        }

        self.size = Vec2::new(actual.width as usize, actual.height as usize);
        self.format = match &actual.fourcc.repr {
            b"YUYV" => WireFormat::Yuyv,
            b"MJPG" => WireFormat::Mjpeg,
            _ => {
                return Err(VideoError::Device(format!(
                    "unsupported pixel format: {}",
                    actual.fourcc
                )));
            }
        };

        let params =
            Capture::set_params(&device, &v4l::video::capture::Parameters::with_fps(self.fps))?;
        log::debug!(
            "{}: {} {:?} at {}/{} s",
            self.path.display(),
            self.size,
            self.format,
            params.interval.numerator,
            params.interval.denominator
        );

        self.stream = match MmapStream::with_buffers(&device, Type::VideoCapture, self.buffer_count)
        {
            Ok(stream) => Some(stream),
            Err(error) => return Err(VideoError::Stream(error.to_string())),
        };

        Ok(self.size)
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn blocking_capture(&mut self) -> Result<VideoFrame, VideoError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(VideoError::Stream("no stream".to_string()));
        };
        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|error| VideoError::Stream(error.to_string()))?;
        let timestamp = Instant::now();
        let color = match self.format {
            WireFormat::Yuyv => yuyv_to_rgb(self.size, data)?,
            WireFormat::Mjpeg => jpeg_to_rgb(data)?,
        };
        Ok(VideoFrame::new(color, timestamp))
    }
}
