//! Immutable settings snapshot handed to every pipeline stage.
//!
//! A caller (CLI, GUI, ...) builds a fresh [`Settings`] value from whatever
//! it stores and passes it by reference into discovery and export. Nothing
//! here touches the disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{
    BYTES_PER_MIB, DEFAULT_EXTENSION_FILTER, DEFAULT_HANDBRAKE_TEMPLATE, DEFAULT_MAX_SIZE_BYTES,
    DEFAULT_REGEX, DEFAULT_RENAME_PATTERN,
};

/// How candidate files are selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Size range and extension list.
    #[default]
    FileProperties,
    /// A single user regex over the canonical path.
    Regex,
}

/// File selection criteria.
///
/// `min_size_bytes <= max_size_bytes` is not enforced here, see
/// [`MatchCriteria::size_range_is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
    pub mode: SearchMode,
    pub use_size: bool,
    pub min_size_bytes: i64,
    pub max_size_bytes: i64,
    pub use_extension: bool,
    /// Lower-case extensions without the leading dot, in insertion order.
    pub extensions: Vec<String>,
    pub regex_pattern: String,
}

/// Where transcoded files end up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OutputPolicy {
    /// Next to the source, named by `rename_pattern` (`{name}` is the source stem).
    InPlace { rename_pattern: String },
    /// Inside `folder`, optionally mirroring the source's parent path.
    SpecificFolder {
        folder: PathBuf,
        preserve_structure: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Descend into sub-directories of input folders.
    pub recursive: bool,
    pub criteria: MatchCriteria,
    pub output: OutputPolicy,
    /// Encoder command line, before per-file substitution.
    pub template: String,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            mode: SearchMode::FileProperties,
            use_size: false,
            min_size_bytes: 0,
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            use_extension: true,
            extensions: DEFAULT_EXTENSION_FILTER
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            regex_pattern: DEFAULT_REGEX.to_owned(),
        }
    }
}

impl Default for OutputPolicy {
    fn default() -> Self {
        OutputPolicy::InPlace {
            rename_pattern: DEFAULT_RENAME_PATTERN.to_owned(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recursive: true,
            criteria: MatchCriteria::default(),
            output: OutputPolicy::default(),
            template: DEFAULT_HANDBRAKE_TEMPLATE.to_owned(),
        }
    }
}

impl MatchCriteria {
    /// Whether the free-form regex decides membership.
    #[inline]
    pub fn uses_regex(&self) -> bool {
        self.mode == SearchMode::Regex
    }

    /// Check the size bounds. The matcher itself trusts whatever it is given.
    pub fn size_range_is_valid(&self) -> bool {
        !self.use_size || self.min_size_bytes <= self.max_size_bytes
    }

    /// Replace the extension list from user input such as `"AVI, mkv|mp4"`.
    pub fn set_extensions_csv(&mut self, csv: &str) {
        self.extensions = parse_extension_list(csv);
    }

    /// Comma separated rendering for display.
    pub fn extensions_csv(&self) -> String {
        self.extensions.join(",")
    }

    pub fn set_size_range_mib(&mut self, min_mib: i64, max_mib: i64) {
        self.min_size_bytes = mib_to_bytes(min_mib);
        self.max_size_bytes = mib_to_bytes(max_mib);
    }
}

impl OutputPolicy {
    pub fn in_place(rename_pattern: impl Into<String>) -> Self {
        OutputPolicy::InPlace {
            rename_pattern: rename_pattern.into(),
        }
    }

    pub fn specific_folder(folder: impl Into<PathBuf>, preserve_structure: bool) -> Self {
        OutputPolicy::SpecificFolder {
            folder: folder.into(),
            preserve_structure,
        }
    }

    #[inline]
    pub fn is_in_place(&self) -> bool {
        matches!(self, OutputPolicy::InPlace { .. })
    }
}

/// Normalise a user supplied extension list.
///
/// Lower-cases, drops whitespace and leading dots, accepts `,` or `|` as
/// separators and removes duplicates while keeping the first occurrence.
pub fn parse_extension_list(csv: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in csv.split([',', '|']) {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let ext = cleaned.trim_start_matches('.');
        if ext.is_empty() || out.iter().any(|e| e == ext) {
            continue;
        }
        out.push(ext.to_owned());
    }
    out
}

#[inline]
pub fn mib_to_bytes(mib: i64) -> i64 {
    mib.saturating_mul(BYTES_PER_MIB)
}

#[inline]
pub fn bytes_to_mib(bytes: i64) -> i64 {
    bytes / BYTES_PER_MIB
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
