use std::{
    collections::HashSet,
    fs::read_dir,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use thiserror::Error;

use crate::{
    config::DISCOVERY_CAPACITY,
    filter::{AcceptAll, FileFilter},
    record::FileEntry,
};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("{0} is not supported yet")]
    Unsupported(&'static str),
}

/// Walk `roots` and return every file accepted by `filter`.
///
/// Files among the roots are tested directly. Directories are traversed
/// depth-first, fully when `recursive`, otherwise one level deep; they are
/// never tested themselves. Unreadable directories contribute nothing.
pub fn discover_all<F: FileFilter + ?Sized>(
    roots: &[FileEntry],
    recursive: bool,
    filter: &F,
) -> Vec<FileEntry> {
    let mut found = Vec::with_capacity(DISCOVERY_CAPACITY);
    for root in roots {
        visit_root(root, recursive, filter, &mut found);
    }
    debug!(
        "[crawl] {} roots produced {} files (recursive: {recursive})",
        roots.len(),
        found.len()
    );
    found
}

/// [`discover_all`] without a filter: every regular file is included.
pub fn discover_all_unfiltered(roots: &[FileEntry], recursive: bool) -> Vec<FileEntry> {
    discover_all(roots, recursive, &AcceptAll)
}

/// Discovery with memory of previously crawled roots.
///
/// One crawler serves one caller; concurrent use must be serialised by
/// that caller.
#[derive(Debug, Default)]
pub struct Crawler {
    known_roots: Vec<PathBuf>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crawl only roots this crawler has not seen yet, then remember them.
    ///
    /// Files below already known roots are not revisited, so the result is
    /// the delta contributed by the new roots.
    pub fn discover_incremental<F: FileFilter + ?Sized>(
        &mut self,
        roots: &[FileEntry],
        recursive: bool,
        filter: &F,
    ) -> Vec<FileEntry> {
        let mut fresh: Vec<FileEntry> = Vec::new();
        for root in roots {
            if self.is_known(&root.path) || fresh.iter().any(|r| r.path == root.path) {
                debug!("[crawl] skipping known root {:?}", root.path);
                continue;
            }
            fresh.push(root.clone());
        }

        let found = discover_all(&fresh, recursive, filter);
        self.known_roots
            .extend(fresh.into_iter().map(|root| root.path));
        found
    }

    /// Re-test files below known roots against a changed filter.
    pub fn revalidate<F: FileFilter + ?Sized>(
        &mut self,
        _recursive: bool,
        _filter: &F,
    ) -> Result<Vec<FileEntry>, CrawlError> {
        Err(CrawlError::Unsupported("incremental re-validation"))
    }

    pub fn is_known(&self, root: &Path) -> bool {
        self.known_roots.iter().any(|known| known == root)
    }

    pub fn known_roots(&self) -> &[PathBuf] {
        &self.known_roots
    }

    /// Forget a root so the next incremental crawl visits it again.
    pub fn forget(&mut self, root: &Path) -> bool {
        let before = self.known_roots.len();
        self.known_roots.retain(|known| known != root);
        before != self.known_roots.len()
    }

    pub fn reset(&mut self) {
        self.known_roots.clear();
    }
}

fn visit_root<F: FileFilter + ?Sized>(
    root: &FileEntry,
    recursive: bool,
    filter: &F,
    found: &mut Vec<FileEntry>,
) {
    if root.is_file {
        test_file(root.clone(), filter, found);
    } else if root.is_dir {
        if recursive {
            let mut visited = HashSet::new();
            if first_visit(&root.path, &mut visited) {
                walk_recursive(&root.path, filter, found, &mut visited);
            }
        } else {
            for child in list_children(&root.path) {
                if child.is_file {
                    test_file(child, filter, found);
                }
            }
        }
    } else {
        debug!("[crawl] root {:?} is neither file nor directory", root.path);
    }
}

fn walk_recursive<F: FileFilter + ?Sized>(
    dir: &Path,
    filter: &F,
    found: &mut Vec<FileEntry>,
    visited: &mut HashSet<PathBuf>,
) {
    for child in list_children(dir) {
        if child.is_file {
            test_file(child, filter, found);
        } else if child.is_dir && first_visit(&child.path, visited) {
            walk_recursive(&child.path, filter, found, visited);
        }
    }
}

// Symlinked directories are followed; a directory whose real path was
// already walked from this root is skipped, which ends link cycles.
fn first_visit(dir: &Path, visited: &mut HashSet<PathBuf>) -> bool {
    match dir.canonicalize() {
        Ok(real) => {
            let fresh = visited.insert(real);
            if !fresh {
                debug!("[crawl] {:?} already walked; not descending again", dir);
            }
            fresh
        }
        Err(e) => {
            warn!("[crawl] cannot resolve {:?}: {e}", dir);
            false
        }
    }
}

#[inline]
fn test_file<F: FileFilter + ?Sized>(entry: FileEntry, filter: &F, found: &mut Vec<FileEntry>) {
    if filter.accept(&entry) {
        found.push(entry);
    }
}

/// Children of `dir` in listing order; empty when the directory cannot be read.
fn list_children(dir: &Path) -> Vec<FileEntry> {
    let rd = match read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("[crawl] read_dir({:?}) failed: {e}", dir);
            return Vec::new();
        }
    };

    let mut children = Vec::new();
    for entry_res in rd {
        match entry_res {
            Ok(entry) => children.push(FileEntry::observe(entry.path())),
            Err(e) => warn!("[crawl] error reading entry in {:?}: {e}", dir),
        }
    }
    children
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
