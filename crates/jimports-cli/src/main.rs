//! jimports CLI binary.
//!
//! This is the entry point for the `jimports` command-line tool. It
//! initializes logging via `tracing`, parses arguments with `clap`, and
//! runs the fix pipeline. The rewritten source goes to stdout; logging
//! stays on stderr so output can be piped.

mod cli;
mod rewrite;
mod run;

use miette::Result;

fn main() -> Result<()> {
    let args = cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    run::exec(args)
}
