//! The dependency graph model.
//!
//! [`DependencyGraph`] holds one [`Vertex`] per transaction in list order,
//! an identity index for O(1) lookup of a transaction's vertex, and a
//! reverse index from each output address to the vertex producing it.
//!
//! # Invariants
//!
//! - Every output address has at most one producer.
//! - Every input address is spent at most once.
//! - Every dependency edge points at a vertex of this graph.
//! - The graph is never mutated after [`GraphBuilder`] returns it.
//!
//! [`GraphBuilder`]: crate::builder::GraphBuilder

use std::collections::HashMap;

use lineage_types::{Address, Transaction, TxId};

use crate::vertex::{Vertex, VertexId};

/// Directed "depends-on" graph over a borrowed transaction set.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph<'a> {
    pub(crate) vertices: Vec<Vertex<'a>>,
    pub(crate) by_id: HashMap<&'a TxId, VertexId>,
    pub(crate) producers: HashMap<&'a Address, VertexId>,
}

impl<'a> DependencyGraph<'a> {
    /// Total number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.dependencies().len()).sum()
    }

    /// All vertices in transaction list order.
    pub fn vertices(&self) -> &[Vertex<'a>] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<'a>> {
        self.vertices.get(id.0)
    }

    /// Vertex lookup for ids handed out by this graph.
    pub(crate) fn get(&self, id: VertexId) -> &Vertex<'a> {
        &self.vertices[id.0]
    }

    /// The vertex registered under `id`, if any.
    pub fn find(&self, id: &TxId) -> Option<VertexId> {
        self.by_id.get(id).copied()
    }

    /// The vertex of `tx`, provided both its id and its content match the
    /// transaction the graph was built from.
    pub fn locate(&self, tx: &Transaction) -> Option<VertexId> {
        self.find(tx.id())
            .filter(|&id| self.get(id).transaction() == tx)
    }

    /// The vertex producing `address`, if any.
    pub fn producer_of(&self, address: &Address) -> Option<VertexId> {
        self.producers.get(address).copied()
    }

    /// Vertices whose transactions spend nothing.
    pub fn origins(&self) -> impl Iterator<Item = &Vertex<'a>> + '_ {
        self.vertices
            .iter()
            .filter(|v| v.input_addresses().is_empty())
    }
}
