//! Ancestry queries over a built [`DependencyGraph`].
//!
//! [`AncestryResolver`] answers two questions about a vertex: which vertices
//! directly produce its inputs, and which vertices (transitively) are needed
//! to account for all of them. The second query walks the graph depth-first
//! with an explicit frame stack, so a long chain of transactions costs heap
//! rather than call stack.
//!
//! All traversal bookkeeping (markers, unresolved-input counters, discovery
//! order) lives in a `Traversal` created per query and dropped when the
//! query returns. The graph itself is only ever borrowed immutably, which
//! makes concurrent queries against one graph safe.

use std::collections::HashMap;

use lineage_types::{Address, Transaction};
use tracing::debug;

use crate::config::TraversalMode;
use crate::error::{LineageError, LineageResult};
use crate::graph::DependencyGraph;
use crate::vertex::{Vertex, VertexId};

/// Read-only ancestry queries against a dependency graph.
#[derive(Clone, Copy, Debug)]
pub struct AncestryResolver<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    mode: TraversalMode,
}

impl<'g, 'a> AncestryResolver<'g, 'a> {
    pub fn new(graph: &'g DependencyGraph<'a>, mode: TraversalMode) -> Self {
        Self { graph, mode }
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Transactions producing `vertex`'s inputs, in input declaration order.
    ///
    /// Fails with [`LineageError::VertexNotFound`] if `vertex` does not
    /// belong to this graph.
    pub fn immediate_dependencies(&self, vertex: VertexId) -> LineageResult<Vec<&'a Transaction>> {
        Ok(self
            .vertex(vertex)?
            .dependencies()
            .iter()
            .map(|&dep| self.graph.get(dep).transaction())
            .collect())
    }

    /// `vertex`'s transaction together with every transitive dependency,
    /// dependencies first and `vertex` last.
    ///
    /// Fails with [`LineageError::CycleDetected`] if the traversal revisits
    /// a vertex in a way the configured [`TraversalMode`] treats as circular,
    /// and with [`LineageError::MissingTransaction`] if any reached vertex
    /// spends an address nothing in the graph produces.
    pub fn upstream_closure(&self, vertex: VertexId) -> LineageResult<Vec<&'a Transaction>> {
        let root = self.vertex(vertex)?;
        debug!(root = %root.id(), mode = ?self.mode, "resolving upstream closure");

        let order = Traversal::new(self.graph, self.mode)
            .run(vertex)
            .inspect_err(|e| debug!(root = %root.id(), error = %e, "upstream closure failed"))?;

        debug!(root = %root.id(), size = order.len(), "resolved upstream closure");
        Ok(order
            .into_iter()
            .map(|id| self.graph.get(id).transaction())
            .collect())
    }

    fn vertex(&self, id: VertexId) -> LineageResult<&'g Vertex<'a>> {
        self.graph
            .vertex(id)
            .ok_or(LineageError::VertexNotFound(id))
    }
}

/// Per-vertex traversal marker. Absent entries in the side table are
/// [`Marker::Unvisited`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Unvisited,
    OnActivePath,
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct Visit {
    marker: Marker,
    /// Declared inputs not yet matched to a walked dependency.
    unresolved: usize,
}

/// A vertex whose dependency list is being walked.
#[derive(Clone, Copy, Debug)]
struct Frame {
    vertex: VertexId,
    next: usize,
}

/// State of a single `upstream_closure` call.
struct Traversal<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    mode: TraversalMode,
    visits: HashMap<VertexId, Visit>,
    discovered: Vec<VertexId>,
    finished: Vec<VertexId>,
    frames: Vec<Frame>,
}

impl<'g, 'a> Traversal<'g, 'a> {
    fn new(graph: &'g DependencyGraph<'a>, mode: TraversalMode) -> Self {
        Self {
            graph,
            mode,
            visits: HashMap::new(),
            discovered: Vec::new(),
            finished: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn run(mut self, root: VertexId) -> LineageResult<Vec<VertexId>> {
        let graph = self.graph;
        self.discover(root);

        while let Some(frame) = self.frames.last_mut() {
            let current = frame.vertex;
            let Some(&dep) = graph.get(current).dependencies().get(frame.next) else {
                self.frames.pop();
                self.finish(current);
                continue;
            };
            frame.next += 1;

            let remaining = self.consume_input(current);
            match self.marker(dep) {
                Marker::Unvisited => self.discover(dep),
                seen if self.closes_cycle(seen, remaining) => {
                    return Err(LineageError::CycleDetected(graph.get(dep).id().clone()));
                }
                _ => {}
            }
        }

        self.check_resolved()?;

        Ok(match self.mode {
            TraversalMode::Compatible => {
                let mut order = self.discovered;
                order.reverse();
                order
            }
            TraversalMode::Topological => self.finished,
        })
    }

    fn marker(&self, id: VertexId) -> Marker {
        self.visits
            .get(&id)
            .map_or(Marker::Unvisited, |visit| visit.marker)
    }

    fn discover(&mut self, id: VertexId) {
        let declared = self.graph.get(id).input_addresses().len();
        self.visits.insert(
            id,
            Visit {
                marker: Marker::OnActivePath,
                unresolved: declared,
            },
        );
        self.discovered.push(id);
        self.frames.push(Frame {
            vertex: id,
            next: 0,
        });
    }

    fn finish(&mut self, id: VertexId) {
        if let Some(visit) = self.visits.get_mut(&id) {
            visit.marker = Marker::Finished;
        }
        self.finished.push(id);
    }

    /// Count one walked dependency against `id`'s declared inputs and return
    /// how many remain.
    fn consume_input(&mut self, id: VertexId) -> usize {
        self.visits.get_mut(&id).map_or(0, |visit| {
            visit.unresolved = visit.unresolved.saturating_sub(1);
            visit.unresolved
        })
    }

    /// Whether reaching an already discovered dependency is a cycle.
    ///
    /// A dependency still on the active path always is. In compatible mode
    /// any discovered dependency also is once it closes the current vertex's
    /// declared inputs.
    fn closes_cycle(&self, seen: Marker, remaining: usize) -> bool {
        match self.mode {
            TraversalMode::Compatible => seen == Marker::OnActivePath || remaining == 0,
            TraversalMode::Topological => seen == Marker::OnActivePath,
        }
    }

    /// Fail on the first discovered vertex with inputs left unmatched.
    fn check_resolved(&self) -> LineageResult<()> {
        for &id in &self.discovered {
            let unresolved = self.visits.get(&id).map_or(0, |visit| visit.unresolved);
            if unresolved == 0 {
                continue;
            }
            if let Some(address) = self.first_unresolved(id) {
                return Err(LineageError::MissingTransaction {
                    transaction: self.graph.get(id).id().clone(),
                    address: address.clone(),
                });
            }
        }
        Ok(())
    }

    fn first_unresolved(&self, id: VertexId) -> Option<&'g Address> {
        self.graph
            .get(id)
            .input_addresses()
            .iter()
            .find(|address| self.graph.producer_of(address).is_none())
    }
}
