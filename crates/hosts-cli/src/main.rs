//! Hosts Blocker CLI
//!
//! Interactive menu that installs a downloaded block-list into the hosts
//! file, or removes it again.

mod cli;
mod console;
mod error;
mod logging;
mod menu;

use clap::Parser;
use colored::Colorize;
use hosts_core::{BlockerConfig, HostsUpdater, privilege};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {e}")))?;

    let config = BlockerConfig::load_or_default(cli.config.as_deref())?;
    privilege::ensure_elevated(config.require_elevation)?;

    let mut updater = HostsUpdater::from_config(&config)?;
    print_status(&updater);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    console::run_session(stdin.lock(), &mut stdout, &mut updater)?;
    Ok(())
}

fn print_status<F, C>(updater: &HostsUpdater<F, C>)
where
    F: hosts_core::Fetcher,
    C: hosts_core::CacheFlusher,
{
    match updater.status() {
        Ok(status) if status.installed => println!(
            "{} {} ({} entries installed, {} backups)",
            "Hosts file:".bold(),
            updater.hosts_path(),
            status.entries,
            status.backups
        ),
        Ok(status) => println!(
            "{} {} (no blocker entries installed, {} backups)",
            "Hosts file:".bold(),
            updater.hosts_path(),
            status.backups
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read hosts file status");
            println!(
                "{} {} {}",
                "Hosts file:".bold(),
                updater.hosts_path(),
                "(unreadable)".yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let error: CliError = hosts_core::Error::NotElevated.into();
        assert_eq!(error.to_string(), hosts_core::Error::NotElevated.to_string());
    }
}
