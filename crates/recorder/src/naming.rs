use {
    chrono::{DateTime, Local},
    std::path::{Path, PathBuf},
};

pub const RECORDING_PREFIX: &str = "motion_";
pub const THUMBNAIL_SUFFIX: &str = "_thumb.jpg";

/// `motion_YYYYMMDD_HHMMSS.<extension>` for a recording started at `time`.
pub fn recording_name(time: &DateTime<Local>, extension: &str) -> String {
    format!(
        "{}{}.{}",
        RECORDING_PREFIX,
        time.format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Path in `directory` for a recording started at `time` that does not exist
/// yet. Clashes within the same second get `_1`, `_2`, ... appended.
pub fn unique_recording_path(directory: &Path, time: &DateTime<Local>, extension: &str) -> PathBuf {
    let path = directory.join(recording_name(time, extension));
    if !path.exists() {
        return path;
    }
    let stem = format!("{}{}", RECORDING_PREFIX, time.format("%Y%m%d_%H%M%S"));
    (1..)
        .map(|n| directory.join(format!("{stem}_{n}.{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Name of the cached thumbnail belonging to a recording file name.
pub fn thumbnail_name(recording: &str) -> String {
    let stem = Path::new(recording)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| recording.to_string());
    format!("{stem}{THUMBNAIL_SUFFIX}")
}

/// Whether `name` looks like a file produced by the recorder.
pub fn is_recording_name(name: &str) -> bool {
    name.starts_with(RECORDING_PREFIX) && !name.ends_with(THUMBNAIL_SUFFIX)
}
