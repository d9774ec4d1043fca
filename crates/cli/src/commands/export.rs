use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;
use vbatch_engine::{Backend, ExportOutcome, enforce_extension, sanitize_template, spawn_build};
use vbatch_runtime::{DEFAULT_FFMPEG_EXECUTABLE, OutputPolicy, Settings};

use crate::commands::SelectionArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// HandBrake queue file (XML)
    Handbrake,
    /// One ffmpeg command per line
    Ffmpeg,
}

/// Where encoded files are written.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Name pattern for files written next to their source; {name} is the
    /// source name without extension
    #[arg(long, value_name = "PATTERN", conflicts_with = "output_dir")]
    pub rename: Option<String>,

    /// Write encoded files into this folder instead
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Recreate each source's folder path below --output-dir
    #[arg(long, requires = "output_dir")]
    pub preserve: bool,
}

impl OutputArgs {
    pub fn policy(&self) -> Option<OutputPolicy> {
        if let Some(dir) = &self.output_dir {
            return Some(OutputPolicy::specific_folder(dir, self.preserve));
        }
        self.rename.as_deref().map(OutputPolicy::in_place)
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub destination: OutputArgs,

    /// Encoder to generate the script for
    #[arg(long, value_enum, default_value_t = BackendKind::Handbrake)]
    pub backend: BackendKind,

    /// Encoder command line applied to every file
    #[arg(long, short = 't', value_name = "COMMAND", allow_hyphen_values = true)]
    pub template: Option<String>,

    /// ffmpeg program used in the generated script
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FFMPEG_EXECUTABLE)]
    pub ffmpeg_path: String,

    /// Write the script to FILE instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep FILE as given instead of appending the script extension
    #[arg(long, requires = "output")]
    pub keep_name: bool,
}

impl ExportArgs {
    pub fn backend(&self) -> Backend {
        match self.backend {
            BackendKind::Handbrake => Backend::Handbrake,
            BackendKind::Ffmpeg => Backend::Ffmpeg {
                executable: self.ffmpeg_path.clone(),
            },
        }
    }

    /// Settings snapshot for this invocation.
    ///
    /// HandBrake templates are stripped of `-i`/`-o`; ffmpeg starts from an
    /// empty template when none is given.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        self.selection.apply(&mut settings)?;
        if let Some(policy) = self.destination.policy() {
            settings.output = policy;
        }

        match (self.backend, &self.template) {
            (BackendKind::Handbrake, Some(t)) => settings.template = sanitize_template(t),
            (BackendKind::Handbrake, None) => {}
            (BackendKind::Ffmpeg, t) => settings.template = t.clone().unwrap_or_default(),
        }
        Ok(settings)
    }
}

pub fn run(args: ExportArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ExportArgs) -> Result<ExitCode> {
    let settings = args.settings()?;
    let backend = args.backend();
    let roots = args.selection.roots();
    info!(
        "[export] {} over {} roots, template {:?}",
        backend.name(),
        roots.len(),
        settings.template
    );

    let handle = spawn_build(backend, settings, roots);
    let outcome = handle.wait().context("export failed")?;

    match &args.output {
        Some(target) => {
            let path = if args.keep_name {
                target.clone()
            } else {
                enforce_extension(target, outcome.script_extension)
            };
            write_script(&path, &outcome)?;
            eprintln!(
                "[export] {} jobs written to {}",
                outcome.job_count,
                path.display()
            );
        }
        None => print!("{}", outcome.script),
    }

    Ok(ExitCode::SUCCESS)
}

fn write_script(path: &Path, outcome: &ExportOutcome) -> Result<()> {
    fs::write(path, &outcome.script)
        .with_context(|| format!("failed to write script to {}", path.display()))
}
