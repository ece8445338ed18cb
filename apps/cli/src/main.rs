//! PersonScope CLI — background-check style person profiles.
//!
//! Combines a legal-records provider and a web-search provider into one
//! profile per queried document number or name.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
