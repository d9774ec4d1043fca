use log::{debug, trace};
use regex::{Regex, RegexBuilder};
use vbatch_fs::{FileEntry, FileFilter};
use vbatch_runtime::{MatchCriteria, SearchMode};

use crate::error::{EngineError, Result};

/// File predicate compiled once from a [`MatchCriteria`] snapshot.
///
/// Later edits to the criteria do not affect an existing matcher; compile a
/// new one instead.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    size_range: Option<(i64, i64)>,
    path_regex: Option<Regex>,
}

impl CompiledMatcher {
    pub fn compile(criteria: &MatchCriteria) -> Result<Self> {
        let (size_range, pattern) = match criteria.mode {
            SearchMode::FileProperties => {
                let size = criteria
                    .use_size
                    .then_some((criteria.min_size_bytes, criteria.max_size_bytes));
                let ext = criteria
                    .use_extension
                    .then(|| extension_pattern(&criteria.extensions));
                (size, ext)
            }
            SearchMode::Regex => (None, Some(criteria.regex_pattern.clone())),
        };

        let path_regex = match pattern {
            Some(p) => Some(compile_full_match(&p)?),
            None => None,
        };

        debug!(
            "[match] compiled mode={:?} size={:?} regex={:?}",
            criteria.mode,
            size_range,
            path_regex.as_ref().map(Regex::as_str)
        );
        Ok(Self {
            size_range,
            path_regex,
        })
    }

    /// Matcher with no active checks.
    pub fn accept_all() -> Self {
        Self {
            size_range: None,
            path_regex: None,
        }
    }

    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.size_range.is_none() && self.path_regex.is_none()
    }

    pub fn test(&self, entry: &FileEntry) -> bool {
        if let Some((min, max)) = self.size_range {
            let len = i64::try_from(entry.len).unwrap_or(i64::MAX);
            if len < min || len > max {
                return false;
            }
        }

        if let Some(re) = &self.path_regex {
            let canonical = match entry.canonical() {
                Ok(p) => p,
                Err(e) => {
                    trace!("[match] cannot resolve {:?}: {e}", entry.path);
                    return false;
                }
            };
            if !re.is_match(&canonical.to_string_lossy()) {
                return false;
            }
        }

        true
    }
}

impl FileFilter for CompiledMatcher {
    #[inline]
    fn accept(&self, entry: &FileEntry) -> bool {
        self.test(entry)
    }
}

/// Regex matching any path ending in one of `extensions`.
///
/// `["avi", "mkv"]` gives `.*\.(avi|mkv)`. Extensions are escaped, so a
/// stray `+` or `.` in user input is taken literally.
pub fn extension_pattern(extensions: &[String]) -> String {
    let alternation = extensions
        .iter()
        .map(|e| regex::escape(e))
        .collect::<Vec<_>>()
        .join("|");
    format!(r".*\.({alternation})")
}

// The whole input must match, case-insensitively.
fn compile_full_match(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
        .map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
