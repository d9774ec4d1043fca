use std::{
    collections::HashMap,
    ffi::OsStr,
    io,
    path::{self, Component, Path, PathBuf},
};

use log::debug;
use vbatch_fs::FileEntry;
use vbatch_runtime::OutputPolicy;

/// Placeholder in a rename pattern replaced by the source stem.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Destination path for every resolved source file.
///
/// Keys are the source paths exactly as discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputMapping {
    destinations: HashMap<PathBuf, String>,
}

impl OutputMapping {
    pub fn get(&self, entry: &FileEntry) -> Option<&str> {
        self.get_path(&entry.path)
    }

    pub fn get_path(&self, source: &Path) -> Option<&str> {
        self.destinations.get(source).map(String::as_str)
    }

    pub fn insert(&mut self, source: impl Into<PathBuf>, destination: impl Into<String>) {
        self.destinations.insert(source.into(), destination.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.destinations
            .iter()
            .map(|(src, dst)| (src.as_path(), dst.as_str()))
    }
}

/// Compute the destination of each file under `policy`, with `dest_ext` as
/// the new extension (no leading dot).
pub fn resolve(files: &[FileEntry], policy: &OutputPolicy, dest_ext: &str) -> OutputMapping {
    let mut mapping = OutputMapping {
        destinations: HashMap::with_capacity(files.len()),
    };
    for entry in files {
        let destination = resolve_one(entry, policy, dest_ext);
        mapping.insert(entry.path.clone(), destination);
    }
    mapping
}

/// Destination for a single file; see [`resolve`].
pub fn resolve_one(entry: &FileEntry, policy: &OutputPolicy, dest_ext: &str) -> String {
    let source = entry.canonical().unwrap_or_else(|_| entry.path.clone());
    let source_parent = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = entry.stem();

    let (parent, name) = match policy {
        OutputPolicy::InPlace { rename_pattern } => (
            source_parent.to_path_buf(),
            rename_pattern.replace(NAME_PLACEHOLDER, &stem),
        ),
        OutputPolicy::SpecificFolder {
            folder,
            preserve_structure,
        } => {
            let parent = if *preserve_structure {
                folder.join(relative_mirror(source_parent))
            } else {
                folder.clone()
            };
            (parent, stem)
        }
    };

    compose(&parent, &name, dest_ext)
}

// `C:\videos\in` -> `C\videos\in`, `/home/in` -> `home/in`: drive
// separators go and the result is relative so it nests under a folder.
fn relative_mirror(parent: &Path) -> PathBuf {
    let text = parent.to_string_lossy().replace(':', "");
    PathBuf::from(text.trim_start_matches(['/', '\\']))
}

// Resolve the parent to a real absolute directory; components given
// verbatim only when that hits an I/O error.
fn compose(parent: &Path, name: &str, ext: &str) -> String {
    let file_name = format!("{name}.{ext}");
    match canonical_dir(parent) {
        Ok(real) => real.join(file_name).to_string_lossy().into_owned(),
        Err(e) => {
            debug!("[output] cannot resolve {:?} ({e}); using it verbatim", parent);
            parent.join(file_name).to_string_lossy().into_owned()
        }
    }
}

/// Canonical form of `dir`, which need not exist yet.
///
/// The path is made absolute and cleaned of `.`/`..` first. The longest
/// existing ancestor is then resolved on disk and the missing tail is
/// appended unchanged.
fn canonical_dir(dir: &Path) -> io::Result<PathBuf> {
    let cleaned = lexical_clean(&path::absolute(dir)?);

    let mut missing: Vec<&OsStr> = Vec::new();
    let mut existing = cleaned.as_path();
    loop {
        match existing.canonicalize() {
            Ok(mut real) => {
                real.extend(missing.iter().rev());
                return Ok(real);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(e);
                };
                missing.push(name);
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}

// `/a/./b/../c` -> `/a/c`; `..` never climbs above the root.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
