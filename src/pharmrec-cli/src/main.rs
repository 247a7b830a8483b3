mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            inputs,
            output,
            pretty,
            master,
        } => {
            commands::parse::handle(&inputs, output.as_deref(), pretty, master.as_deref())?;
        }

        Commands::Inspect { input, full } => {
            commands::inspect::handle(&input, full)?;
        }

        Commands::Scan { path, extension } => {
            commands::scan::handle(&path, &extension)?;
        }

        Commands::Configure { master_db, show } => {
            commands::configure::handle(master_db, show)?;
        }
    }

    Ok(())
}
