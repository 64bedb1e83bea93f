use clap::Parser;
use eqres::cli::{Cli, Commands};
use eqres::cli_handlers;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            file,
            undefined,
            json,
        } => cli_handlers::handle_resolve(&file, undefined, json),
        Commands::Order { file } => cli_handlers::handle_order(&file),
        Commands::Graph { file } => cli_handlers::handle_graph(&file),
        Commands::Demo => cli_handlers::handle_demo(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
