use crate::error::{Result, ResolveError};
use crate::graph::{DirectedGraph, TopologicalSort};
use crate::models::{CyclePath, EquationSet, ResolverConfig, UndefinedPolicy};
use crate::token::{extract_tokens, substitute};
use std::sync::OnceLock;

/// Resolution order or the cycle that prevents one
#[derive(Debug, Clone)]
enum Outcome {
    Ordered(Vec<String>),
    Cyclic(CyclePath),
}

/// Expands every variable reference in a set of equations.
///
/// The dependency graph and its sort are computed once in the constructor.
/// The expanded set is computed on the first call to
/// [`expanded_equations`](Self::expanded_equations) and cached, so a built
/// resolver can be shared across threads for reads.
#[derive(Debug)]
pub struct EquationResolver {
    equations: EquationSet,
    config: ResolverConfig,
    graph: DirectedGraph,
    outcome: Outcome,
    expanded: OnceLock<Result<EquationSet>>,
}

impl EquationResolver {
    pub fn new(equations: EquationSet) -> Self {
        Self::with_config(equations, ResolverConfig::default())
    }

    pub fn with_config(equations: EquationSet, config: ResolverConfig) -> Self {
        let graph = build_graph(&equations);
        let outcome = match TopologicalSort::new(&graph).into_result() {
            Ok(ordering) => Outcome::Ordered(ordering),
            Err(cycle) => Outcome::Cyclic(cycle),
        };

        EquationResolver {
            equations,
            config,
            graph,
            outcome,
            expanded: OnceLock::new(),
        }
    }

    pub fn equations(&self) -> &EquationSet {
        &self.equations
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// Names referenced directly by `name`'s expression
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.graph.adjacency(name)
    }

    pub fn has_cycle(&self) -> bool {
        matches!(self.outcome, Outcome::Cyclic(_))
    }

    /// The cycle found at construction, `None` when the equations are acyclic
    pub fn cycle(&self) -> Option<&CyclePath> {
        match &self.outcome {
            Outcome::Cyclic(cycle) => Some(cycle),
            Outcome::Ordered(_) => None,
        }
    }

    /// Every graph vertex, dependencies first. Includes undefined names.
    pub fn ordering(&self) -> Result<&[String]> {
        match &self.outcome {
            Outcome::Ordered(ordering) => Ok(ordering),
            Outcome::Cyclic(cycle) => Err(ResolveError::MissingOrdering {
                path: cycle.names().to_vec(),
            }),
        }
    }

    /// Whether the expanded set has already been computed
    pub fn is_expanded(&self) -> bool {
        self.expanded.get().is_some()
    }

    /// The input set with every variable token replaced by its fully expanded
    /// definition.
    ///
    /// Tokens naming no equation follow the configured [`UndefinedPolicy`].
    pub fn expanded_equations(&self) -> Result<&EquationSet> {
        let ordering = match &self.outcome {
            Outcome::Ordered(ordering) => ordering,
            Outcome::Cyclic(cycle) => {
                return Err(ResolveError::CyclicDependency {
                    path: cycle.names().to_vec(),
                });
            }
        };

        self.expanded
            .get_or_init(|| self.expand(ordering))
            .as_ref()
            .map_err(ResolveError::clone)
    }

    /// Single forward pass over `ordering`; each dependency is already final
    /// by the time a dependent reads it.
    fn expand(&self, ordering: &[String]) -> Result<EquationSet> {
        let mut expanded = EquationSet::new();

        for name in ordering {
            let Some(raw) = self.equations.get(name) else {
                continue;
            };

            let text = substitute(raw, |token| {
                if let Some(value) = expanded.get(token) {
                    return Ok(Some(value.clone()));
                }
                match self.config.undefined {
                    UndefinedPolicy::Keep => {
                        tracing::warn!(equation = %name, variable = token, "undefined variable left as is");
                        Ok(None)
                    }
                    UndefinedPolicy::Empty => {
                        tracing::warn!(equation = %name, variable = token, "undefined variable removed");
                        Ok(Some(String::new()))
                    }
                    UndefinedPolicy::Error => Err(ResolveError::UndefinedVariable {
                        name: token.to_string(),
                        equation: name.clone(),
                    }),
                }
            })?;

            expanded.insert(name.clone(), text);
        }

        tracing::debug!(equations = expanded.len(), "expansion complete");
        Ok(expanded)
    }
}

/// One vertex per equation and per referenced name, one edge per distinct
/// reference.
pub fn build_graph(equations: &EquationSet) -> DirectedGraph {
    let mut graph = DirectedGraph::new();

    for (name, expression) in equations {
        graph.add_vertex(name);
        for token in extract_tokens(expression) {
            graph.add_vertex(token.name);
            graph.add_edge(name, token.name);
        }
    }

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "dependency graph built"
    );
    graph
}
