//! Command-line argument surface.
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "monkeyscript",
    version,
    about = "Compiler and VM for the Monkeyscript language",
    disable_version_flag = true
)]
pub struct Args {
    /// Script to compile and run. With no file, starts the REPL.
    pub file: Option<String>,

    /// Disable tracing output.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Enable tracing output (default on).
    #[arg(short = 't', long = "verbose")]
    pub verbose: bool,

    /// Print version and exit.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: (),
}

impl Args {
    pub fn tracing_enabled(&self) -> bool {
        !self.quiet
    }
}
