pub mod cli;
pub mod cli_handlers;
pub mod core;
pub mod error;
pub mod graph;
pub mod input;
pub mod models;
pub mod render;
pub mod token;

pub use crate::core::{EquationResolver, build_graph};
pub use error::{LoadError, ResolveError, Result};
pub use graph::{DirectedGraph, TopologicalSort};
pub use models::*;
pub use token::{Token, extract_tokens};
