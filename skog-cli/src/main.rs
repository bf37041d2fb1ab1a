//! skog CLI - value forest stands from an inventory export.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "skog-cli",
    version,
    about = "Forest stand valuation toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: skog_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting skog-cli");
    skog_cmd::run(cli.command)
}
