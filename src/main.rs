//! CLI entry point for example-driven tile grid generation

use clap::Parser;
use tileweave::io::cli::{Cli, FileProcessor};

fn main() -> tileweave::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
