//! CLI entry point for the wave function collapse tile generator

use clap::Parser;
use tilecollapse::io::cli::{Cli, GenerationJob};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    GenerationJob::new(cli).run().map(|_| ())
}
