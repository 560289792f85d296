//! lago - command line tool for querying and charting lake observations.

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(
    name = "lago",
    version,
    about = "Lake observation query and charting toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    commands::run(cli.command)
}
