//! Dependency ordering of the store.
//!
//! ## Components
//!
//! - [`TemplateStore::topological_order`]: Kahn's algorithm over the
//!   dependency graph, callees before callers.
//! - [`TemplateStore::cyclic_templates`]: members of dependency cycles, via
//!   strongly connected components.

use std::collections::VecDeque;

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::store::TemplateStore;

/// Result of [`TemplateStore::topological_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalOrder {
    /// IRIs whose dependencies all come earlier in this list.
    pub sorted: Vec<String>,
    /// IRIs on or downstream of a dependency cycle.
    pub unsorted: Vec<String>,
}

impl TopologicalOrder {
    pub fn is_complete(&self) -> bool {
        self.unsorted.is_empty()
    }
}

impl TemplateStore {
    /// Order every node so that each template comes after the templates its
    /// body instantiates.
    ///
    /// Nodes without dependencies (base templates, undefined references,
    /// empty bodies) form the initial frontier. Nodes that never reach zero
    /// remaining dependencies are returned in `unsorted`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn topological_order(&self) -> TopologicalOrder {
        let graph = self.graph();
        let mut remaining: FxHashMap<NodeIndex, usize> = graph
            .node_indices()
            .map(|idx| (idx, graph.edges(idx).count()))
            .collect();

        let mut frontier: VecDeque<NodeIndex> = graph
            .node_indices()
            .filter(|idx| remaining[idx] == 0)
            .collect();

        let mut sorted = Vec::with_capacity(remaining.len());
        while let Some(idx) = frontier.pop_front() {
            sorted.push(idx);
            for edge in graph.edges_directed(idx, Direction::Incoming) {
                let caller = edge.source();
                if let Some(count) = remaining.get_mut(&caller) {
                    *count -= 1;
                    if *count == 0 {
                        frontier.push_back(caller);
                    }
                }
            }
        }

        let done: FxHashSet<NodeIndex> = sorted.iter().copied().collect();
        let unsorted = graph
            .node_indices()
            .filter(|idx| !done.contains(idx))
            .map(|idx| graph[idx].iri().to_string())
            .collect();
        let sorted = sorted
            .into_iter()
            .map(|idx| graph[idx].iri().to_string())
            .collect();

        TopologicalOrder { sorted, unsorted }
    }

    /// IRIs of templates that (transitively) depend on themselves.
    pub fn cyclic_templates(&self) -> FxHashSet<String> {
        let graph = self.graph();
        let mut cyclic = FxHashSet::default();
        for component in tarjan_scc(graph) {
            let is_cycle = component.len() > 1
                || component
                    .first()
                    .is_some_and(|idx| graph.contains_edge(*idx, *idx));
            if is_cycle {
                cyclic.extend(component.iter().map(|idx| graph[*idx].iri().to_string()));
            }
        }
        cyclic
    }
}
