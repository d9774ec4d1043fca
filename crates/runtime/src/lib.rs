mod config;
pub mod logging;
pub mod settings;

pub use config::{
    BYTES_PER_MIB, DEFAULT_EXTENSION_FILTER, DEFAULT_FFMPEG_EXECUTABLE, DEFAULT_HANDBRAKE_TEMPLATE,
    DEFAULT_MAX_SIZE_BYTES, DEFAULT_REGEX, DEFAULT_RENAME_PATTERN, FFMPEG_SCRIPT_EXTENSION,
    HANDBRAKE_SCRIPT_EXTENSION, PROGRAM_NAME, PROJECT_FILE_EXTENSION, default_scan_root,
};
pub use settings::{MatchCriteria, OutputPolicy, SearchMode, Settings};

pub use logging::init;
