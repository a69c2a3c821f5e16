//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Hosts Blocker - install or remove a downloaded block-list in the hosts file
#[derive(Parser, Debug)]
#[command(name = "hosts-blocker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (defaults to the per-user config, then built-in defaults)
    #[arg(short, long, env = "HOSTS_BLOCKER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
