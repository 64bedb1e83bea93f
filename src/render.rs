use crate::graph::DirectedGraph;
use crate::models::{CyclePath, EquationSet};

/// One `NAME = expression` line per equation, sorted by name
pub fn render_equations(equations: &EquationSet) -> String {
    equations
        .iter()
        .map(|(name, expression)| format!("{name} = {expression}\n"))
        .collect()
}

pub fn render_cycle(cycle: &CyclePath) -> String {
    cycle.to_string()
}

/// Resolution order, dependencies first
pub fn render_ordering(ordering: &[String]) -> String {
    ordering.join(" -> ")
}

/// One `NAME: DEP, DEP` line per vertex, leaves included
pub fn render_graph(graph: &DirectedGraph) -> String {
    graph
        .vertices()
        .map(|v| {
            let deps = graph.adjacency(v).join(", ");
            if deps.is_empty() {
                format!("{v}:\n")
            } else {
                format!("{v}: {deps}\n")
            }
        })
        .collect()
}

pub fn render_json(equations: &EquationSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(equations)
}
