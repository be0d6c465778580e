//! dropfix CLI
//!
//! Excludes directories and files from Dropbox by name while keeping their
//! contents in place.

mod cli;
mod commands;
mod console;
mod error;
mod settings;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}: {}", "hint".yellow().bold(), hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Exclude from Dropbox, keep the files", "dropfix".green().bold());
            println!();
            println!("Run {} for available commands.", "dropfix --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so progress on stdout stays readable. `-v` forces
/// debug level, otherwise `RUST_LOG` is honoured when set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run { source, run } => commands::run_walk(&source, &run),
        Commands::Status { source } => commands::run_status(&source),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dropfix", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
        assert!(error.hint().is_none());
    }

    #[test]
    fn stranded_errors_carry_a_hint() {
        let error = crate::error::CliError::from(dropfix_core::Error::Stranded {
            target: "/d/build".into(),
            staged: "/tmp/s/build".into(),
            stage: dropfix_core::Stage::Excluding,
            source: Box::new(dropfix_core::Error::NotRunning),
        });
        assert!(error.hint().is_some());
    }
}
