//! CLI entry point for the polyomino packing feasibility checker

use clap::Parser;
use polypack::io::cli::{Cli, FileProcessor};

fn main() -> polypack::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
