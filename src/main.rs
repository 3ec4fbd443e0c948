//! # bi4-read
//!
//! Command-line inspection of DualSPHysics BI4 output directories.
//!
//! ## Usage
//!
//! ```bash
//! # Time, particle counts and constants of Part_0010.bi4
//! bi4-read part --file 10 --dir ./out
//!
//! # Particle groups from the head file
//! bi4-read head --dir ./out --block-scoped
//!
//! # Time of every snapshot, as JSON
//! bi4-read times --dir ./out --json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
