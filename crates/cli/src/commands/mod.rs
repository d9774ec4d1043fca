pub mod defaults;
pub mod export;
pub mod scan;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use vbatch_runtime::{
    SearchMode, Settings, default_scan_root,
    settings::mib_to_bytes,
};

pub use defaults::DefaultsArgs;
pub use export::ExportArgs;
pub use scan::ScanArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the files the current filters select.
    ///
    /// Example:
    ///   vbatch scan ~/Videos --ext avi,mkv
    ///   vbatch scan /data --regex '.*holiday.*' --json
    Scan(ScanArgs),

    /// Generate a HandBrake queue or an ffmpeg batch script.
    ///
    /// Example:
    ///   vbatch export ~/Videos --rename '{name}-small' -o jobs
    ///   vbatch export /data --backend ffmpeg --template 'ffmpeg -c:v libx264 out.mp4'
    Export(ExportArgs),

    /// Print the default settings as JSON.
    Defaults(DefaultsArgs),
}

/// Roots to crawl and the criteria that select files below them.
#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Files or folders to search (default: the video folder)
    #[arg(value_name = "PATH")]
    pub roots: Vec<PathBuf>,

    /// Only look at the files directly inside each folder
    #[arg(long)]
    pub no_recursive: bool,

    /// Smallest accepted file size in MiB
    #[arg(long, value_name = "MIB")]
    pub min_size: Option<i64>,

    /// Largest accepted file size in MiB
    #[arg(long, value_name = "MIB")]
    pub max_size: Option<i64>,

    /// Accepted extensions, comma separated (e.g. "avi,mkv")
    #[arg(long, value_name = "CSV", conflicts_with = "no_ext")]
    pub ext: Option<String>,

    /// Accept files of any extension
    #[arg(long)]
    pub no_ext: bool,

    /// Select by a regular expression over the full path instead
    #[arg(
        long,
        value_name = "PATTERN",
        conflicts_with_all = ["min_size", "max_size", "ext", "no_ext"]
    )]
    pub regex: Option<String>,
}

impl SelectionArgs {
    pub fn roots(&self) -> Vec<PathBuf> {
        if self.roots.is_empty() {
            vec![default_scan_root()]
        } else {
            self.roots.clone()
        }
    }

    /// Override the selection part of `settings` with the given flags.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        settings.recursive = !self.no_recursive;
        let criteria = &mut settings.criteria;

        if let Some(pattern) = &self.regex {
            criteria.mode = SearchMode::Regex;
            criteria.regex_pattern = pattern.clone();
            return Ok(());
        }

        if self.min_size.is_some() || self.max_size.is_some() {
            criteria.use_size = true;
            if let Some(min) = self.min_size {
                criteria.min_size_bytes = mib_to_bytes(min);
            }
            if let Some(max) = self.max_size {
                criteria.max_size_bytes = mib_to_bytes(max);
            }
            if !criteria.size_range_is_valid() {
                bail!("--min-size must not be larger than --max-size");
            }
        }

        if self.no_ext {
            criteria.use_extension = false;
        } else if let Some(csv) = &self.ext {
            criteria.set_extensions_csv(csv);
            if criteria.extensions.is_empty() {
                bail!("--ext needs at least one extension");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
