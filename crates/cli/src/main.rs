use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use vbatch_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "vbatch",
    version,
    about = "Batch transcoding script generator for HandBrake and ffmpeg"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_verbosity(cli.verbose).ok();

    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
        Command::Export(args) => commands::export::run(args),
        Command::Defaults(args) => commands::defaults::run(args),
    }
}
