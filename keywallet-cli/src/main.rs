//! keywallet - command-line HD wallet utility
//!
//! Derives hierarchical deterministic keys from named seeds and prints
//! blockchain-style addresses for them.

mod commands;
mod prompt;

use clap::Parser;

use commands::Commands;

#[derive(Parser)]
#[command(name = "keywallet")]
#[command(about = env!("CARGO_PKG_DESCRIPTION"), version = keywallet::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("keywallet={},keywallet_cli={}", log_level, log_level))
        .with_writer(std::io::stderr)
        .init();

    commands::execute_command(cli.command)
}
