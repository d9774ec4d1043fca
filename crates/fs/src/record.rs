use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// A path plus the classification observed when it was visited.
///
/// Entries are re-read on every crawl; nothing is cached across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    pub path: PathBuf,
    pub is_file: bool,
    pub is_dir: bool,
    /// The path itself is a symbolic link (its target decides `is_file`/`is_dir`).
    pub is_symlink: bool,
    /// File length in bytes, 0 for directories and unreadable paths.
    pub len: u64,
}

impl FileEntry {
    /// Stat `path`, following symlinks. Unreadable paths become an entry that
    /// is neither file nor directory.
    pub fn observe(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_symlink = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        match fs::metadata(&path) {
            Ok(meta) => {
                let is_file = meta.is_file();
                FileEntry {
                    is_file,
                    is_dir: meta.is_dir(),
                    is_symlink,
                    len: if is_file { meta.len() } else { 0 },
                    path,
                }
            }
            Err(_) => FileEntry {
                path,
                is_file: false,
                is_dir: false,
                is_symlink,
                len: 0,
            },
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolved absolute path with symlinks and `..` removed.
    pub fn canonical(&self) -> io::Result<PathBuf> {
        self.path.canonicalize()
    }

    /// Canonical path as a string, or the path as given when it cannot be resolved.
    pub fn display_path(&self) -> String {
        match self.canonical() {
            Ok(p) => p.to_string_lossy().into_owned(),
            Err(_) => self.path.to_string_lossy().into_owned(),
        }
    }

    /// File name without its last extension (`a.b.avi` -> `a.b`).
    pub fn stem(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match name.rfind('.') {
            Some(idx) => name[..idx].to_owned(),
            None => name,
        }
    }
}
