//! tfinv cli interface

use clap::Parser;
use std::path::PathBuf;
use tfinv::environment::Environment;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; tfinv ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    /// Environment to read terraform outputs for
    #[arg(value_enum)]
    pub environment: Environment,

    /// Service name used in host ids and group names
    #[arg(long = "service", default_value = "app")]
    pub service: String,

    /// Write the inventory document to an explicit path
    ///
    /// Defaults to inventory/vm/<environment>.yml
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
