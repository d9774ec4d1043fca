//! Script generation for batch encoders.
//!
//! [`ScriptExporter`] owns the flow shared by every backend: find the
//! destination extension, resolve output paths, compose one job per file and
//! serialise. A [`ScriptBackend`] supplies the encoder specific pieces.

mod ffmpeg;
mod handbrake;
mod xml;

use log::{debug, warn};
use vbatch_fs::FileEntry;
use vbatch_runtime::OutputPolicy;

use crate::{
    error::{EngineError, Result},
    output::{OutputMapping, resolve},
};

pub use ffmpeg::{FfmpegBackend, looks_like_file, reduce_template};
pub use handbrake::{HandbrakeBackend, sanitize_template};

/// One encoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Position in the script, starting at 0 with no gaps.
    pub id: u64,
    pub source: String,
    pub destination: String,
    pub command_line: String,
}

/// Encoder specific half of an export.
pub trait ScriptBackend {
    fn name(&self) -> &'static str;

    /// Extension of the script file this backend writes, without the dot.
    fn script_extension(&self) -> &'static str;

    /// Extension shared by all destination files, derived from `template`.
    fn extract_extension(&self, template: &str) -> Result<String>;

    /// Runs once per build before any line is composed.
    fn prepare(&mut self, _template: &str) -> Result<()> {
        Ok(())
    }

    /// Invocation for one file. Paths are final and unquoted.
    fn compose_line(&self, source: &str, destination: &str) -> String;

    fn serialize(&self, jobs: &[ExportJob]) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    NotBuilt,
    Building,
    Built,
}

/// Single-use script builder.
///
/// Moves `NotBuilt -> Building -> Built`; the finished script stays cached
/// and any further build is refused with [`EngineError::AlreadyBuilt`]. A
/// failed build returns to `NotBuilt`.
#[derive(Debug)]
pub struct ScriptExporter<B> {
    backend: B,
    template: String,
    stage: BuildStage,
    destination_extension: Option<String>,
    jobs: Vec<ExportJob>,
    script: Option<String>,
}

impl<B: ScriptBackend> ScriptExporter<B> {
    pub fn new(backend: B, template: impl Into<String>) -> Self {
        Self {
            backend,
            template: template.into(),
            stage: BuildStage::NotBuilt,
            destination_extension: None,
            jobs: Vec::new(),
            script: None,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[inline]
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    #[inline]
    pub fn script_extension(&self) -> &'static str {
        self.backend.script_extension()
    }

    /// Destination extension, derived from the template on first use.
    pub fn destination_extension(&mut self) -> Result<&str> {
        if self.destination_extension.is_none() {
            let ext = self.backend.extract_extension(&self.template)?;
            debug!("[export] {} destination extension: {ext}", self.backend.name());
            self.destination_extension = Some(ext);
        }
        Ok(self.destination_extension.as_deref().unwrap_or_default())
    }

    /// Resolve destinations under `policy`, then build the script.
    pub fn build(&mut self, files: &[FileEntry], policy: &OutputPolicy) -> Result<&str> {
        self.ensure_not_built()?;
        let ext = self.destination_extension()?.to_owned();
        let mapping = resolve(files, policy, &ext);
        self.build_script(files, &mapping)
    }

    /// Build the script from an already resolved mapping.
    ///
    /// Files whose path cannot be resolved or that have no destination in
    /// `mapping` are skipped with a warning; ids stay contiguous.
    pub fn build_script(&mut self, files: &[FileEntry], mapping: &OutputMapping) -> Result<&str> {
        self.ensure_not_built()?;
        self.stage = BuildStage::Building;

        match self.run_build(files, mapping) {
            Ok(script) => {
                self.stage = BuildStage::Built;
                Ok(self.script.insert(script).as_str())
            }
            Err(e) => {
                self.stage = BuildStage::NotBuilt;
                self.jobs.clear();
                Err(e)
            }
        }
    }

    /// Cached output of a finished build.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn jobs(&self) -> &[ExportJob] {
        &self.jobs
    }

    fn ensure_not_built(&self) -> Result<()> {
        match self.stage {
            BuildStage::NotBuilt => Ok(()),
            BuildStage::Building | BuildStage::Built => Err(EngineError::AlreadyBuilt),
        }
    }

    fn run_build(&mut self, files: &[FileEntry], mapping: &OutputMapping) -> Result<String> {
        self.destination_extension()?;
        self.backend.prepare(&self.template)?;

        let mut jobs = Vec::with_capacity(files.len());
        for entry in files {
            let source = match entry.canonical() {
                Ok(p) => p.to_string_lossy().into_owned(),
                Err(e) => {
                    warn!("[export] skipping {:?}: {e}", entry.path);
                    continue;
                }
            };
            let Some(destination) = mapping.get(entry) else {
                warn!("[export] skipping {:?}: no destination", entry.path);
                continue;
            };

            jobs.push(ExportJob {
                id: jobs.len() as u64,
                command_line: self.backend.compose_line(&source, destination),
                destination: destination.to_owned(),
                source,
            });
        }

        debug!(
            "[export] {} built {} of {} jobs",
            self.backend.name(),
            jobs.len(),
            files.len()
        );
        let script = self.backend.serialize(&jobs);
        self.jobs = jobs;
        Ok(script)
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
