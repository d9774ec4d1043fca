//! End-to-end flow: settings -> matcher -> discovery -> destinations -> script.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use crossbeam::channel::{self, Receiver};
use log::{debug, warn};
use vbatch_fs::{Crawler, FileEntry, discover_all};
use vbatch_runtime::{DEFAULT_FFMPEG_EXECUTABLE, Settings};

use crate::{
    error::{EngineError, Result},
    export::{FfmpegBackend, HandbrakeBackend, ScriptBackend, ScriptExporter},
    filter::CompiledMatcher,
};

/// Target encoder of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Handbrake,
    Ffmpeg { executable: String },
}

impl Backend {
    pub fn ffmpeg() -> Self {
        Backend::Ffmpeg {
            executable: DEFAULT_FFMPEG_EXECUTABLE.to_owned(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Handbrake => "handbrake",
            Backend::Ffmpeg { .. } => "ffmpeg",
        }
    }
}

/// A finished script, ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub script: String,
    /// Extension the script file should carry, without the dot.
    pub script_extension: &'static str,
    pub job_count: usize,
}

/// Crawl `roots` and keep the files accepted by the settings' criteria.
pub fn discover(settings: &Settings, roots: &[PathBuf]) -> Result<Vec<FileEntry>> {
    let matcher = CompiledMatcher::compile(&settings.criteria)?;
    let entries: Vec<FileEntry> = roots.iter().map(FileEntry::observe).collect();
    Ok(discover_all(&entries, settings.recursive, &matcher))
}

/// Build the script for an already discovered file set.
pub fn run_export(
    backend: &Backend,
    settings: &Settings,
    files: &[FileEntry],
) -> Result<ExportOutcome> {
    match backend {
        Backend::Handbrake => export_with(HandbrakeBackend::new(), settings, files),
        Backend::Ffmpeg { executable } => {
            export_with(FfmpegBackend::new(executable.as_str()), settings, files)
        }
    }
}

/// [`discover`] followed by [`run_export`].
pub fn build_from_roots(
    backend: &Backend,
    settings: &Settings,
    roots: &[PathBuf],
) -> Result<ExportOutcome> {
    let files = discover(settings, roots)?;
    run_export(backend, settings, &files)
}

fn export_with<B: ScriptBackend>(
    backend: B,
    settings: &Settings,
    files: &[FileEntry],
) -> Result<ExportOutcome> {
    let mut exporter = ScriptExporter::new(backend, settings.template.as_str());
    let script = exporter.build(files, &settings.output)?.to_owned();
    Ok(ExportOutcome {
        script,
        script_extension: exporter.script_extension(),
        job_count: exporter.jobs().len(),
    })
}

/// Result of a build running on a worker thread.
pub struct BuildHandle {
    rx: Receiver<Result<ExportOutcome>>,
    worker: Option<JoinHandle<()>>,
}

/// Run [`build_from_roots`] in the background.
///
/// The caller can do other work (e.g. ask where to save) and collect the
/// script with [`BuildHandle::wait`]. Dropping the handle abandons the
/// result; the worker finishes on its own.
pub fn spawn_build(backend: Backend, settings: Settings, roots: Vec<PathBuf>) -> BuildHandle {
    let (tx, rx) = channel::bounded(1);
    let worker = thread::spawn(move || {
        let result = build_from_roots(&backend, &settings, &roots);
        if tx.send(result).is_err() {
            debug!("[pipeline] build result dropped; handle was released");
        }
    });
    BuildHandle {
        rx,
        worker: Some(worker),
    }
}

impl BuildHandle {
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Block until the worker delivers its result.
    pub fn wait(mut self) -> Result<ExportOutcome> {
        let received = self.rx.recv();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("[pipeline] build worker panicked");
        }
        received.map_err(|_| EngineError::WorkerLost)?
    }
}

/// One canonical path per line, each terminated by `\n`.
///
/// Paths that can no longer be resolved are left out.
pub fn render_file_list(files: &[FileEntry]) -> String {
    let mut out = String::new();
    for entry in files {
        match entry.canonical() {
            Ok(p) => {
                out.push_str(&p.to_string_lossy());
                out.push('\n');
            }
            Err(e) => warn!("[pipeline] leaving {:?} out of the list: {e}", entry.path),
        }
    }
    out
}

/// Append `.ext` unless the file name already ends with it.
pub fn enforce_extension(path: &Path, ext: &str) -> PathBuf {
    let suffix = format!(".{ext}");
    let has_suffix = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(&suffix));
    if has_suffix {
        return path.to_path_buf();
    }
    let mut raw = OsString::from(path.as_os_str());
    raw.push(&suffix);
    PathBuf::from(raw)
}

/// Working lists of an interactive caller: the roots the user picked and the
/// files currently selected for transcoding.
#[derive(Debug, Default)]
pub struct Session {
    inputs: Vec<FileEntry>,
    matched: Vec<FileEntry>,
    crawler: Crawler,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &[FileEntry] {
        &self.inputs
    }

    pub fn matched(&self) -> &[FileEntry] {
        &self.matched
    }

    /// Add roots not already present. Returns how many were new.
    pub fn add_inputs<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.inputs.len();
        for path in paths {
            let path = path.into();
            if self.inputs.iter().any(|e| e.path == path) {
                continue;
            }
            self.inputs.push(FileEntry::observe(path));
        }
        self.inputs.len() - before
    }

    /// Drop roots; their files leave the selection on the next [`refresh`].
    ///
    /// [`refresh`]: Session::refresh
    pub fn remove_inputs(&mut self, paths: &[PathBuf]) -> usize {
        let before = self.inputs.len();
        self.inputs.retain(|e| !paths.contains(&e.path));
        for path in paths {
            self.crawler.forget(path);
        }
        before - self.inputs.len()
    }

    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
        self.crawler.reset();
    }

    pub fn clear_matched(&mut self) {
        self.matched.clear();
    }

    /// Re-crawl every root from scratch. Returns the selection size.
    pub fn refresh(&mut self, settings: &Settings) -> Result<usize> {
        let matcher = CompiledMatcher::compile(&settings.criteria)?;
        self.crawler.reset();
        self.matched = self
            .crawler
            .discover_incremental(&self.inputs, settings.recursive, &matcher);
        Ok(self.matched.len())
    }

    /// Crawl only roots added since the last crawl and append their files.
    pub fn discover_new(&mut self, settings: &Settings) -> Result<usize> {
        let matcher = CompiledMatcher::compile(&settings.criteria)?;
        let found = self
            .crawler
            .discover_incremental(&self.inputs, settings.recursive, &matcher);
        let mut added = 0;
        for entry in found {
            if !self.matched.iter().any(|m| m.path == entry.path) {
                self.matched.push(entry);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Re-test the selection against changed criteria without a re-crawl.
    pub fn revalidate(&mut self, settings: &Settings) -> Result<usize> {
        let matcher = CompiledMatcher::compile(&settings.criteria)?;
        let kept = self.crawler.revalidate(settings.recursive, &matcher)?;
        self.matched = kept;
        Ok(self.matched.len())
    }

    pub fn move_input(&mut self, _path: &Path, _up: bool) -> Result<()> {
        Err(EngineError::Unsupported("reordering input roots"))
    }

    pub fn move_matched(&mut self, _path: &Path, _up: bool) -> Result<()> {
        Err(EngineError::Unsupported("reordering selected files"))
    }

    pub fn remove_matched(&mut self, _paths: &[PathBuf]) -> Result<()> {
        Err(EngineError::Unsupported("removing single selected files"))
    }

    /// Clipboard rendering of the selection.
    pub fn file_list(&self) -> String {
        render_file_list(&self.matched)
    }

    pub fn export(&self, backend: &Backend, settings: &Settings) -> Result<ExportOutcome> {
        run_export(backend, settings, &self.matched)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
