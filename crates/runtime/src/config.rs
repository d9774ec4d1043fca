use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "vbatch";
pub const PROGRAM_LOG_LEVEL: &str = "VBATCH_LOG_LEVEL";

/// Extension of Handbrake queue documents.
pub const HANDBRAKE_SCRIPT_EXTENSION: &str = "queue";
/// Extension of generated FFmpeg batch scripts.
pub const FFMPEG_SCRIPT_EXTENSION: &str = "bat";
/// Extension of saved project files.
pub const PROJECT_FILE_EXTENSION: &str = "vbpp";

pub const DEFAULT_FFMPEG_EXECUTABLE: &str = "ffmpeg";

pub const BYTES_PER_MIB: i64 = 1_048_576;

pub const DEFAULT_RENAME_PATTERN: &str = "{name}-conv";

/// Upper size bound used when the size filter is first enabled (1000000 MiB).
pub const DEFAULT_MAX_SIZE_BYTES: i64 = 1_048_576_000_000;

/// Container formats picked up by the default extension filter.
pub const DEFAULT_EXTENSION_FILTER: &[&str] = &[
    "3gp", "flv", "mov", "qt", "divx", "mkv", "asf", "wmv", "avi", "mpg", "mpeg", "mp2", "mp4",
    "m4v", "rm", "ogg", "ogv", "yuv",
];

pub const DEFAULT_REGEX: &str = r".*(\.(avi|mkv|mp4))";

pub const DEFAULT_HANDBRAKE_TEMPLATE: &str = "-f mkv --strict-anamorphic -e x264 -q 25 -a 1 \
-E lame -6 dpl2 -R Auto -B 128 -D 0.0 \
-x ref=2:bframes=2:subq=6:mixed-refs=0:weightb=0:8x8dct=0:trellis=0 --verbose=1";

/// Default root to search for videos when the caller supplies none.
///
/// Prefers the platform video directory, then the home directory, then the
/// current directory.
pub fn default_scan_root() -> PathBuf {
    dirs::video_dir()
        .filter(|p| p.is_dir())
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
