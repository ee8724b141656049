pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::RunMode;

#[derive(Parser)]
#[command(name = "trendmail")]
#[command(about = "Email the daily GitHub Trending top 10", long_about = None)]
pub struct Cli {
    /// Print the rendered email instead of sending it
    #[arg(long, visible_alias = "no-email")]
    pub dry_run: bool,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Deliver
        }
    }
}
