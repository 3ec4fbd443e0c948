use anyhow::Result;
use bi4::array::ArrayKey;
use bi4::reader::ReaderConfig;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::path::PathBuf;

mod arrays;
mod config;
mod head;
mod output;
mod part;
mod times;

use config::Config;

/// bi4 - DualSPHysics BI4 snapshot reader
#[derive(Parser)]
#[command(name = "bi4-read")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding Part_XXXX.bi4 and Part_Head files
    #[arg(short = 'd', long, value_name = "DIR", global = true)]
    dir: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Load and query snapshots in parallel (requires the parallel feature)
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Per-particle arrays selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ArrayArg {
    /// Positions (f32 x3)
    Pos,
    /// Positions (f64 x3)
    Posd,
    /// Particle ids (i32)
    Idp,
    /// Velocities (f32 x3)
    Vel,
    /// Densities (f32)
    Rhop,
}

impl From<ArrayArg> for ArrayKey {
    fn from(arg: ArrayArg) -> Self {
        match arg {
            ArrayArg::Pos => ArrayKey::POS,
            ArrayArg::Posd => ArrayKey::POSD,
            ArrayArg::Idp => ArrayKey::IDP,
            ArrayArg::Vel => ArrayKey::VEL,
            ArrayArg::Rhop => ArrayKey::RHOP,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show time, particle counts and simulation constants for one snapshot
    Part {
        /// Part number (resolved to Part_XXXX.bi4)
        #[arg(short, long, value_name = "N")]
        file: u32,
    },

    /// List the particle groups described by the head file
    Head {
        /// Read Count/MkType/Mk from each block instead of the whole file
        #[arg(long)]
        block_scoped: bool,
    },

    /// Show the simulation time of every snapshot
    Times,

    /// Dump a per-particle array from one snapshot
    Arrays {
        /// Part number (resolved to Part_XXXX.bi4)
        #[arg(short, long, value_name = "N")]
        file: u32,

        /// Array to decode
        #[arg(short, long, value_enum, default_value = "pos")]
        array: ArrayArg,

        /// Print at most this many rows
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,
    },
}

/// Settings resolved from flags, config file and defaults
pub struct Context {
    /// Case output directory
    pub dir: PathBuf,
    /// Reader configuration
    pub reader: ReaderConfig,
    /// JSON output requested
    pub json: bool,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    fn context(&self) -> Result<Context> {
        let file_config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let mut reader = file_config.reader.settings.apply(ReaderConfig::default());
        if self.parallel {
            reader = reader.with_parallel(true);
        }
        if let Commands::Head { block_scoped: true } = self.command {
            reader = reader.with_block_scoped_groups(true);
        }

        let dir = self
            .dir
            .clone()
            .or(file_config.reader.data_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!("data dir {}, {:?}", dir.display(), reader);

        Ok(Context {
            dir,
            reader,
            json: self.json,
        })
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = cli.context()?;
    match cli.command {
        Commands::Part { file } => part::run(&ctx, file),
        Commands::Head { .. } => head::run(&ctx),
        Commands::Times => times::run(&ctx),
        Commands::Arrays { file, array, rows } => arrays::run(&ctx, file, array.into(), rows),
    }
}
