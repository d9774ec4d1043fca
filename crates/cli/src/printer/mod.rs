use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

/// Configuration for printing matched files.
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Print a count line to stderr when done.
    pub show_summary: bool,
}

/// Static context about a print run.
#[derive(Debug)]
pub struct ScanPrintContext<'a> {
    /// Label for this listing, e.g. `scan`.
    pub kind: &'a str,
    /// Number of roots that were crawled.
    pub roots: usize,
    pub total: usize,
}

/// One matched file.
#[derive(Debug)]
pub struct FileRow<'a> {
    /// Canonical path when resolvable.
    pub path: &'a str,
    pub size: u64,
}

/// Receives the rows of one listing in order.
pub trait FilePrinter {
    fn begin(&mut self, ctx: &ScanPrintContext) -> io::Result<()>;

    fn print_row(&mut self, row: &FileRow<'_>, ctx: &ScanPrintContext) -> io::Result<()>;

    /// Footers and summaries.
    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()>;
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Printer over arbitrary writers; `Auto` color means no color here.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    #[inline]
    fn format_path(&self, path: &str) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", path)
        } else {
            path.to_owned()
        }
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> FilePrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &ScanPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &FileRow<'_>, _ctx: &ScanPrintContext) -> io::Result<()> {
        let path = self.format_path(row.path);
        writeln!(self.out, "{}", path)
    }

    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            writeln!(
                self.err,
                "\n[{}] {} files in {} roots",
                ctx.kind, ctx.total, ctx.roots
            )?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> FilePrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &ScanPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &FileRow<'_>, _ctx: &ScanPrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "path": row.path,
            "size": row.size,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &ScanPrintContext) -> io::Result<()> {
        if self.cfg.show_summary {
            let obj = serde_json::json!({
                "type": "summary",
                "kind": ctx.kind,
                "roots": ctx.roots,
                "total": ctx.total,
            });
            writeln!(self.err, "{}", obj)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
