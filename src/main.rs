//! CLI entry point for pooled grid level generation

use clap::Parser;
use floorgen::io::cli::{Cli, LevelRunner, format_summary};
use floorgen::io::logging::init_tracing;

// Allow print for the per-level summary, the tool's primary output
#[allow(clippy::print_stdout)]
fn main() -> floorgen::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let mut runner = LevelRunner::new(cli);
    for summary in runner.run()? {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}
