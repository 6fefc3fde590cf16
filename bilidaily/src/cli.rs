use std::path::PathBuf;

use bilidaily_config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bilidaily", about = "Daily bilibili chores: coins, shares and watch progress")]
pub struct Cli {
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log at debug level regardless of the configured level.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the daily task pipeline once.
    Run {
        /// Check the configuration and list the tasks without executing them.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Check the stored session and print the account summary.
    Login {
        /// Fall back to QR code login when the session is invalid.
        #[arg(long, default_value_t = false)]
        qr: bool,
    },
    /// Log in by scanning a QR code and save the cookie to the config file.
    QrLogin,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from(["bilidaily", "run", "-c", "alt.json", "-v", "--dry-run"]);
        assert_eq!(cli.config, PathBuf::from("alt.json"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Run { dry_run: true }));
    }

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::parse_from(["bilidaily", "login", "--qr"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Login { qr: true }));
    }

    #[test]
    fn init_accepts_force() {
        let cli = Cli::parse_from(["bilidaily", "init", "-f"]);
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
