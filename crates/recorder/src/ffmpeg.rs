use {
    crate::*,
    base::Vec2,
    image::Image,
    std::{
        io::Write,
        path::{Path, PathBuf},
        process::{Child, ChildStdin, Command, Stdio},
    },
};

/// Whether `program` lists `codec` among its encoders.
pub fn ffmpeg_has_encoder(program: &Path, codec: &str) -> Result<bool, RecordError> {
    let output = Command::new(program)
        .arg("-hide_banner")
        .arg("-encoders")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| {
            RecordError::EncoderUnavailable(format!("cannot run {}: {e}", program.display()))
        })?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    // lines look like " V....D libx264   H.264 / AVC ..."
    Ok(stdout
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some(codec)))
}

/// Encode one generated frame of `size` with `codec` and throw it away.
/// Listing an encoder does not mean it accepts these dimensions.
pub fn ffmpeg_can_encode(
    program: &Path,
    codec: &str,
    size: Vec2<usize>,
    fps: u32,
) -> Result<(), RecordError> {
    let output = Command::new(program)
        .args(["-hide_banner", "-loglevel", "error", "-f", "lavfi", "-i"])
        .arg(format!("color=c=black:s={}x{}:r={}", size.x, size.y, fps))
        .args(["-frames:v", "1", "-an", "-c:v", codec, "-pix_fmt", "yuv420p"])
        .args(["-f", "null", "-"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .output()
        .map_err(|e| {
            RecordError::EncoderUnavailable(format!("cannot run {}: {e}", program.display()))
        })?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = stderr.lines().last().unwrap_or("no output").trim().to_string();
    Err(RecordError::EncoderUnavailable(format!(
        "{codec} cannot encode {size} ({}): {reason}",
        output.status
    )))
}

/// Encodes through an `ffmpeg` child process reading raw RGB24 on stdin.
pub struct FfmpegWriter {
    child: Child,
    stdin: Option<ChildStdin>,
    path: PathBuf,
    size: Vec2<usize>,
}

impl FfmpegWriter {
    pub fn create(
        program: &Path,
        path: &Path,
        codec: &str,
        size: Vec2<usize>,
        fps: u32,
    ) -> Result<Self, RecordError> {
        if !ffmpeg_has_encoder(program, codec)? {
            return Err(RecordError::EncoderUnavailable(format!(
                "ffmpeg has no {codec} encoder"
            )));
        }
        ffmpeg_can_encode(program, codec, size, fps)?;

        let mut child = Command::new(program)
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .arg("-s")
            .arg(format!("{}x{}", size.x, size.y))
            .arg("-r")
            .arg(fps.to_string())
            .args(["-i", "-", "-an", "-c:v", codec, "-pix_fmt", "yuv420p"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RecordError::EncoderUnavailable(format!("cannot start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        Ok(Self {
            child,
            stdin,
            path: path.to_path_buf(),
            size,
        })
    }
}

impl VideoWriter for FfmpegWriter {
    fn write_frame(&mut self, frame: &Image) -> Result<(), RecordError> {
        check_frame(frame, self.size)?;
        if let Some(status) = self.child.try_wait()? {
            self.stdin.take();
            return Err(RecordError::Write(format!(
                "ffmpeg exited with {status} while writing {}",
                self.path.display()
            )));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(RecordError::Write("ffmpeg input already closed".to_string()));
        };
        stdin
            .write_all(&frame.data)
            .map_err(|e| RecordError::Write(format!("{}: {}", self.path.display(), e)))
    }

    fn finish(mut self: Box<Self>) -> Result<(), RecordError> {
        // closing stdin lets ffmpeg write the trailer and exit
        self.stdin.take();
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(RecordError::Write(format!(
                "ffmpeg exited with {status} for {}",
                self.path.display()
            )))
        }
    }
}

impl Drop for FfmpegWriter {
    fn drop(&mut self) {
        if self.stdin.take().is_some() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
