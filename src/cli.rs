use crate::models::UndefinedPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eqres")]
#[command(about = "Resolve dependencies between textual equations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand every equation in a file
    Resolve {
        /// Equation file (`NAME = expr` lines or a JSON object), `-` for stdin
        file: PathBuf,
        /// How to treat variables with no defining equation
        #[arg(long, value_enum, env = "EQRES_UNDEFINED", default_value_t = UndefinedPolicy::Keep)]
        undefined: UndefinedPolicy,
        /// Print the result as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Print the resolution order
    Order {
        /// Equation file, `-` for stdin
        file: PathBuf,
    },

    /// Print the dependency graph
    Graph {
        /// Equation file, `-` for stdin
        file: PathBuf,
    },

    /// Resolve the built-in sample equation sets
    Demo,
}
