use crate::error::{Result, ResolveError};
use crate::models::CyclePath;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Adjacency-list graph over named vertices.
///
/// Vertices and each vertex's out-edges keep insertion order, so traversal
/// order (and with it the discovered cycle and the chosen ordering) is fixed
/// for a given sequence of inserts.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    vertices: IndexSet<String>,
    edges: IndexMap<String, Vec<String>>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex; no-op if it is already present
    pub fn add_vertex(&mut self, name: &str) {
        if !self.vertices.contains(name) {
            self.vertices.insert(name.to_string());
        }
    }

    /// Record the edge `from -> to` once.
    ///
    /// Endpoints are not added as vertices; callers add them explicitly.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let targets = self.edges.entry(from.to_string()).or_default();
        if !targets.iter().any(|t| t == to) {
            targets.push(to.to_string());
        }
    }

    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains(name)
    }

    /// Distinct out-neighbours of `v` in first-insertion order
    pub fn adjacency(&self, v: &str) -> &[String] {
        self.edges
            .get(v)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Finished,
}

/// Result of a depth-first sort over a [`DirectedGraph`].
///
/// Either a post-order of every vertex (dependencies before dependents) or the
/// first cycle met during the walk.
#[derive(Debug, Clone)]
pub struct TopologicalSort {
    ordering: Vec<String>,
    cycle: Option<CyclePath>,
}

impl TopologicalSort {
    pub fn new(graph: &DirectedGraph) -> Self {
        let mut walk = Walk {
            graph,
            marks: HashMap::with_capacity(graph.vertex_count()),
            parent: HashMap::new(),
            ordering: Vec::with_capacity(graph.vertex_count()),
            cycle: None,
        };

        for v in graph.vertices() {
            if walk.cycle.is_some() {
                break;
            }
            if !walk.marks.contains_key(v) {
                walk.visit(v);
            }
        }

        match &walk.cycle {
            Some(cycle) => tracing::debug!(%cycle, "sort stopped at cycle"),
            None => tracing::debug!(vertices = walk.ordering.len(), "sort complete"),
        }

        TopologicalSort {
            ordering: walk.ordering.into_iter().map(str::to_string).collect(),
            cycle: walk.cycle,
        }
    }

    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    /// The first cycle found, `None` for an acyclic graph
    pub fn cycle(&self) -> Option<&CyclePath> {
        self.cycle.as_ref()
    }

    /// Vertices with every dependency ahead of its dependents
    pub fn ordering(&self) -> Result<&[String]> {
        match &self.cycle {
            Some(cycle) => Err(ResolveError::MissingOrdering {
                path: cycle.names().to_vec(),
            }),
            None => Ok(&self.ordering),
        }
    }

    pub fn into_result(self) -> std::result::Result<Vec<String>, CyclePath> {
        match self.cycle {
            Some(cycle) => Err(cycle),
            None => Ok(self.ordering),
        }
    }
}

struct Walk<'g> {
    graph: &'g DirectedGraph,
    marks: HashMap<&'g str, Mark>,
    parent: HashMap<&'g str, &'g str>,
    ordering: Vec<&'g str>,
    cycle: Option<CyclePath>,
}

impl<'g> Walk<'g> {
    /// Depth-first visit from `root`, driven by an explicit stack of
    /// (vertex, next neighbour index) frames instead of recursion.
    fn visit(&mut self, root: &'g str) {
        self.marks.insert(root, Mark::OnPath);
        let mut stack: Vec<(&'g str, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (v, next) = *frame;
            let neighbours = self.graph.adjacency(v);

            if self.cycle.is_none() && next < neighbours.len() {
                frame.1 += 1;
                let w = neighbours[next].as_str();
                match self.marks.get(w).copied() {
                    None => {
                        self.parent.insert(w, v);
                        self.marks.insert(w, Mark::OnPath);
                        stack.push((w, 0));
                    }
                    Some(Mark::OnPath) => self.record_cycle(v, w),
                    Some(Mark::Finished) => {}
                }
                continue;
            }

            self.marks.insert(v, Mark::Finished);
            self.ordering.push(v);
            stack.pop();
        }
    }

    /// `w` is an ancestor of `v` on the current path: walk parents back from
    /// `v` to `w` and close the loop.
    fn record_cycle(&mut self, v: &'g str, w: &'g str) {
        let mut path = Vec::new();
        let mut current = v;
        while current != w {
            path.push(current.to_string());
            match self.parent.get(current) {
                Some(&p) => current = p,
                None => break,
            }
        }
        path.push(w.to_string());
        path.reverse();
        path.push(w.to_string());

        tracing::warn!(cycle = %crate::error::format_cycle(&path), "dependency cycle detected");
        self.cycle = Some(CyclePath::new(path));
    }
}
