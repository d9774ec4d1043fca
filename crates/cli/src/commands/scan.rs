use std::io::{Stderr, Stdout};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use vbatch_engine::discover;
use vbatch_runtime::Settings;

use crate::commands::SelectionArgs;
use crate::printer::{
    ColorChoice, FilePrinter, FileRow, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig,
    ScanPrintContext,
};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn FilePrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        let cfg = PrinterConfig {
            format,
            color,
            show_summary: !self.quiet,
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
    let mut settings = Settings::default();
    args.selection.apply(&mut settings)?;
    let roots = args.selection.roots();

    let files = discover(&settings, &roots).context("cannot compile file filter")?;

    let mut printer = args.output.make_printer();
    let ctx = ScanPrintContext {
        kind: "scan",
        roots: roots.len(),
        total: files.len(),
    };

    printer.begin(&ctx)?;
    for entry in &files {
        let path = entry.display_path();
        let row = FileRow {
            path: &path,
            size: entry.len,
        };
        printer.print_row(&row, &ctx)?;
    }
    printer.finish(&ctx)?;

    Ok(ExitCode::SUCCESS)
}
