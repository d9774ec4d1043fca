use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use vbatch_runtime::Settings;

#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Print on a single line
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: DefaultsArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: DefaultsArgs) -> Result<ExitCode> {
    let settings = Settings::default();
    let text = if args.compact {
        serde_json::to_string(&settings)?
    } else {
        serde_json::to_string_pretty(&settings)?
    };
    println!("{text}");
    Ok(ExitCode::SUCCESS)
}
