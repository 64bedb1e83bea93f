use crate::core::EquationResolver;
use crate::input::{load_equations, parse_equations};
use crate::models::{ResolverConfig, UndefinedPolicy};
use crate::render;
use anyhow::{Context, Result};
use std::path::Path;

/// Acyclic sample set
pub const SAMPLE_ACYCLIC: &str = "\
A = B+2
B = C+5
C = 1
D = A+B
";

/// Sample set with a three-way cycle
pub const SAMPLE_CYCLIC: &str = "\
A = B+1
B = C+1
C = A+1
";

fn open(file: &Path, config: ResolverConfig) -> Result<EquationResolver> {
    let equations = load_equations(file)
        .with_context(|| format!("Failed to read equations from {}", file.display()))?;
    Ok(EquationResolver::with_config(equations, config))
}

/// Handle the resolve command
pub fn handle_resolve(file: &Path, undefined: UndefinedPolicy, json: bool) -> Result<()> {
    tracing::debug!(%undefined, "undefined-variable policy");
    let resolver = open(file, ResolverConfig::with_undefined(undefined))?;
    let expanded = resolver.expanded_equations()?;

    if json {
        println!("{}", render::render_json(expanded)?);
    } else {
        print!("{}", render::render_equations(expanded));
    }

    Ok(())
}

/// Handle the order command
pub fn handle_order(file: &Path) -> Result<()> {
    let resolver = open(file, ResolverConfig::default())?;
    let ordering = resolver.ordering()?;

    println!("{}", render::render_ordering(ordering));

    Ok(())
}

/// Handle the graph command
pub fn handle_graph(file: &Path) -> Result<()> {
    let resolver = open(file, ResolverConfig::default())?;

    print!("{}", render::render_graph(resolver.graph()));
    if let Some(cycle) = resolver.cycle() {
        println!("Cycle: {}", render::render_cycle(cycle));
    }

    Ok(())
}

/// Handle the demo command
pub fn handle_demo() -> Result<()> {
    for (title, source) in [("Acyclic", SAMPLE_ACYCLIC), ("Cyclic", SAMPLE_CYCLIC)] {
        let resolver = EquationResolver::new(parse_equations(source)?);

        println!("== {title} ==");
        print!("{}", render::render_equations(resolver.equations()));
        println!("--");
        match resolver.cycle() {
            Some(cycle) => println!("Cycle: {}", render::render_cycle(cycle)),
            None => print!("{}", render::render_equations(resolver.expanded_equations()?)),
        }
        println!();
    }

    Ok(())
}
