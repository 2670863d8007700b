use {
    crate::*,
    base::Vec2,
    image::{Image, encode_jpeg},
    std::{
        fs::File,
        io::{BufWriter, Read, Seek, SeekFrom, Write},
        path::{Path, PathBuf},
    },
};

// byte offsets of the fields patched on finish
const RIFF_SIZE_OFFSET: u64 = 4;
const TOTAL_FRAMES_OFFSET: u64 = 48;
const STREAM_LENGTH_OFFSET: u64 = 140;
const MOVI_SIZE_OFFSET: u64 = 216;
// index offsets are relative to the 'movi' fourcc
const MOVI_FOURCC_OFFSET: u64 = 220;
const HEADER_LEN: u64 = 224;

// every size and offset field is 32 bits
pub const AVI_MAX_FILE_SIZE: u64 = u32::MAX as u64;

const AVIF_HASINDEX: u32 = 0x10;
const AVIIF_KEYFRAME: u32 = 0x10;

fn put_fourcc(buf: &mut Vec<u8>, fourcc: &[u8; 4]) {
    buf.extend_from_slice(fourcc);
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn header(size: Vec2<usize>, fps: u32) -> Vec<u8> {
    let (width, height) = (size.x as u32, size.y as u32);
    let mut buf = Vec::with_capacity(HEADER_LEN as usize);

    put_fourcc(&mut buf, b"RIFF");
    put_u32(&mut buf, 0);
    put_fourcc(&mut buf, b"AVI ");

    put_fourcc(&mut buf, b"LIST");
    put_u32(&mut buf, 192);
    put_fourcc(&mut buf, b"hdrl");

    // main header
    put_fourcc(&mut buf, b"avih");
    put_u32(&mut buf, 56);
    put_u32(&mut buf, 1_000_000 / fps);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, AVIF_HASINDEX);
    put_u32(&mut buf, 0); // total frames
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, width * height * 3);
    put_u32(&mut buf, width);
    put_u32(&mut buf, height);
    buf.extend_from_slice(&[0; 16]);

    put_fourcc(&mut buf, b"LIST");
    put_u32(&mut buf, 116);
    put_fourcc(&mut buf, b"strl");

    // stream header
    put_fourcc(&mut buf, b"strh");
    put_u32(&mut buf, 56);
    put_fourcc(&mut buf, b"vids");
    put_fourcc(&mut buf, b"MJPG");
    put_u32(&mut buf, 0);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, 0);
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 1); // scale
    put_u32(&mut buf, fps); // rate
    put_u32(&mut buf, 0);
    put_u32(&mut buf, 0); // length
    put_u32(&mut buf, width * height * 3);
    put_u32(&mut buf, u32::MAX);
    put_u32(&mut buf, 0);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, 0);
    put_u16(&mut buf, width as u16);
    put_u16(&mut buf, height as u16);

    // stream format
    put_fourcc(&mut buf, b"strf");
    put_u32(&mut buf, 40);
    put_u32(&mut buf, 40);
    put_u32(&mut buf, width);
    put_u32(&mut buf, height);
    put_u16(&mut buf, 1);
    put_u16(&mut buf, 24);
    put_fourcc(&mut buf, b"MJPG");
    put_u32(&mut buf, width * height * 3);
    buf.extend_from_slice(&[0; 16]);

    put_fourcc(&mut buf, b"LIST");
    put_u32(&mut buf, 0); // movi size
    put_fourcc(&mut buf, b"movi");

    buf
}

/// Motion JPEG in an AVI container, written without external tools.
pub struct MjpegAviWriter {
    file: BufWriter<File>,
    path: PathBuf,
    size: Vec2<usize>,
    quality: u8,
    position: u64,
    index: Vec<(u32, u32)>,
    size_limit: u64,
}

impl MjpegAviWriter {
    pub fn create(path: &Path, size: Vec2<usize>, fps: u32, quality: u8) -> Result<Self, RecordError> {
        if size.x == 0 || size.y == 0 || size.x > u16::MAX as usize || size.y > u16::MAX as usize {
            return Err(RecordError::EncoderUnavailable(format!(
                "mjpeg cannot record {size} frames"
            )));
        }
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(&header(size, fps.max(1)))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            size,
            quality,
            position: HEADER_LEN,
            index: Vec::new(),
            size_limit: AVI_MAX_FILE_SIZE,
        })
    }

    /// Refuse frames that would grow the finished file past `limit` bytes.
    /// Never more than `AVI_MAX_FILE_SIZE`.
    pub fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = limit.min(AVI_MAX_FILE_SIZE);
        self
    }

    pub fn frame_count(&self) -> usize {
        self.index.len()
    }
}

impl VideoWriter for MjpegAviWriter {
    fn write_frame(&mut self, frame: &Image) -> Result<(), RecordError> {
        check_frame(frame, self.size)?;
        let jpeg = encode_jpeg(frame, self.quality)?;
        let padded = jpeg.len() as u64 + jpeg.len() as u64 % 2;

        // file size once this frame and its index entry are in
        let finished = self.position + 8 + padded + 8 + (self.index.len() as u64 + 1) * 16;
        if finished > self.size_limit {
            return Err(RecordError::Write(format!(
                "{} would exceed {} bytes, frame skipped",
                self.path.display(),
                self.size_limit
            )));
        }
        let len = jpeg.len() as u32;

        let mut chunk = Vec::with_capacity(jpeg.len() + 9);
        put_fourcc(&mut chunk, b"00dc");
        put_u32(&mut chunk, len);
        chunk.extend_from_slice(&jpeg);
        if len % 2 == 1 {
            chunk.push(0);
        }
        self.file
            .write_all(&chunk)
            .map_err(|e| RecordError::Write(format!("{}: {}", self.path.display(), e)))?;

        self.index
            .push(((self.position - MOVI_FOURCC_OFFSET) as u32, len));
        self.position += chunk.len() as u64;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<(), RecordError> {
        let mut idx = Vec::with_capacity(8 + self.index.len() * 16);
        put_fourcc(&mut idx, b"idx1");
        put_u32(&mut idx, (self.index.len() * 16) as u32);
        for (offset, len) in &self.index {
            put_fourcc(&mut idx, b"00dc");
            put_u32(&mut idx, AVIIF_KEYFRAME);
            put_u32(&mut idx, *offset);
            put_u32(&mut idx, *len);
        }
        self.file.write_all(&idx)?;

        let frames = self.index.len() as u32;
        let movi_size = (self.position - MOVI_FOURCC_OFFSET) as u32;
        let riff_size = (self.position + idx.len() as u64 - 8) as u32;
        for (offset, value) in [
            (RIFF_SIZE_OFFSET, riff_size),
            (TOTAL_FRAMES_OFFSET, frames),
            (STREAM_LENGTH_OFFSET, frames),
            (MOVI_SIZE_OFFSET, movi_size),
        ] {
            self.file.seek(SeekFrom::Start(offset))?;
            self.file.write_all(&value.to_le_bytes())?;
        }
        self.file.flush()?;
        Ok(())
    }
}

/// Total frame count stored in the main header of an AVI file.
pub fn avi_frame_count(path: &Path) -> Result<u32, RecordError> {
    let mut head = [0u8; 52];
    File::open(path)?.read_exact(&mut head)?;
    if &head[0..4] != b"RIFF" || &head[8..12] != b"AVI " || &head[24..28] != b"avih" {
        return Err(RecordError::Write(format!(
            "{} is not an AVI file",
            path.display()
        )));
    }
    Ok(u32::from_le_bytes([head[48], head[49], head[50], head[51]]))
}
