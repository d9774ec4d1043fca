use std::path::Path;

use vbatch_runtime::{DEFAULT_FFMPEG_EXECUTABLE, FFMPEG_SCRIPT_EXTENSION};

use super::{ExportJob, ScriptBackend};
use crate::{
    cmdline::{CommandLine, CommandToken},
    error::{EngineError, Result},
};

const PROGRAM_STEM: &str = "ffmpeg";
const FORMAT_ARG: &str = "-f";
const INPUT_ARG: &str = "-i";
const FALLBACK_EXTENSION: &str = "avi";

/// Writes one `ffmpeg` invocation per line.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    executable: String,
    reduced: CommandLine,
}

impl FfmpegBackend {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            reduced: CommandLine::default(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG_EXECUTABLE)
    }
}

impl ScriptBackend for FfmpegBackend {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn script_extension(&self) -> &'static str {
        FFMPEG_SCRIPT_EXTENSION
    }

    /// ffmpeg guesses the container from the output name, so a trailing
    /// file-like argument wins over a forced `-f` format.
    fn extract_extension(&self, template: &str) -> Result<String> {
        let line = CommandLine::parse(template);

        if let Some(ext) = line.last().and_then(file_extension) {
            return Ok(ext.to_owned());
        }
        if line.contains(FORMAT_ARG) {
            return line
                .token_after(FORMAT_ARG)
                .map(str::to_owned)
                .ok_or_else(|| EngineError::MissingArgument {
                    arg: FORMAT_ARG.to_owned(),
                    template: template.to_owned(),
                });
        }
        Ok(FALLBACK_EXTENSION.to_owned())
    }

    fn prepare(&mut self, template: &str) -> Result<()> {
        self.reduced = reduce(template);
        Ok(())
    }

    fn compose_line(&self, source: &str, destination: &str) -> String {
        let mut line = self.reduced.clone();
        line.insert(0, CommandToken::plain(self.executable.as_str()));
        line.insert(1, CommandToken::plain(INPUT_ARG));
        line.insert(2, CommandToken::quoted(source));
        line.push(CommandToken::quoted(destination));
        line.render()
    }

    fn serialize(&self, jobs: &[ExportJob]) -> String {
        let mut out = String::new();
        for job in jobs {
            out.push_str(&job.command_line);
            out.push('\n');
        }
        out
    }
}

/// Heuristic: contains a dot and is not an option.
pub fn looks_like_file(arg: &str) -> bool {
    arg.contains('.') && !arg.starts_with('-')
}

/// Drop the program name, the `-i <input>` pair and a trailing output path,
/// leaving only the encoding options.
pub fn reduce_template(template: &str) -> String {
    reduce(template).render()
}

fn reduce(template: &str) -> CommandLine {
    let mut line = CommandLine::parse(template);

    let names_program = line
        .first()
        .and_then(|first| Path::new(first).file_stem())
        .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case(PROGRAM_STEM));
    if names_program {
        line.remove_first();
    }
    line.remove_with_following(INPUT_ARG);
    if line.last().is_some_and(looks_like_file) {
        line.remove_last();
    }
    line
}

fn file_extension(arg: &str) -> Option<&str> {
    if !looks_like_file(arg) {
        return None;
    }
    let (_, ext) = arg.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}
