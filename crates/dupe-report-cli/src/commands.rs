use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dupe-report")]
#[command(about = "Reports files sharing the same content across storages", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./DupeReport.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan every storage for duplicate files and send the report
    #[command(alias = "analyze")]
    Analyse,
    /// List configured storages and whether they are online
    ListStorages,
    /// Print configuration values
    PrintConfig,
}
