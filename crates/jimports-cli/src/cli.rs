//! CLI argument definitions for jimports.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "jimports",
    version,
    about = "Add the missing import statements to a Java source file",
    long_about = "jimports analyzes a Java source file, finds every identifier that no \
                  declaration or import covers, and picks the best import for it from the \
                  standard library, sibling files of the same package, and the enclosing \
                  Maven module's dependencies. The rewritten source is written to stdout."
)]
pub struct Cli {
    /// Java source file to fix
    pub file: Option<PathBuf>,

    /// Rewrite the file in place instead of printing to stdout
    #[arg(long)]
    pub replace: bool,

    /// Local Maven repository root (defaults to ~/.m2/repository)
    #[arg(long, value_name = "PATH")]
    pub repository: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Print the usage message, as shown when no file argument is given.
pub fn print_usage() {
    let _ = Cli::command().print_help();
    println!();
}
