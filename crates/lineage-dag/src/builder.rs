//! Dependency graph construction.

use std::collections::HashMap;

use lineage_types::Transaction;
use tracing::{debug, info};

use crate::error::LineageResult;
use crate::graph::DependencyGraph;
use crate::validation::UniquenessValidator;
use crate::vertex::{Vertex, VertexId};

/// Builds a [`DependencyGraph`] from a transaction list.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Validate `transactions` and link every input to the vertex producing
    /// it.
    ///
    /// Runs in two passes: the first creates the vertices and indexes every
    /// output address, the second resolves inputs against that index in
    /// declaration order. An input with no producer adds no edge; it only
    /// becomes an error if an upstream query reaches it.
    pub fn build(transactions: &[Transaction]) -> LineageResult<DependencyGraph<'_>> {
        UniquenessValidator::validate(transactions)?;

        let mut vertices = Vec::with_capacity(transactions.len());
        let mut by_id = HashMap::with_capacity(transactions.len());
        let mut producers = HashMap::new();

        for (index, tx) in transactions.iter().enumerate() {
            let id = VertexId(index);
            vertices.push(Vertex::new(tx));
            by_id.insert(tx.id(), id);
            for address in tx.output_addresses() {
                producers.insert(address, id);
            }
        }

        let mut unresolved = 0usize;
        for vertex in &mut vertices {
            let tx = vertex.transaction();
            for address in tx.input_addresses() {
                match producers.get(address) {
                    Some(&producer) => vertex.add_dependency(producer),
                    None => {
                        unresolved += 1;
                        debug!(tx = %tx.id(), %address, "input has no producer in set");
                    }
                }
            }
        }

        let graph = DependencyGraph {
            vertices,
            by_id,
            producers,
        };
        info!(
            vertices = graph.len(),
            edges = graph.edge_count(),
            unresolved,
            "built dependency graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineageError;

    fn deps(graph: &DependencyGraph<'_>, index: usize) -> Vec<usize> {
        graph.vertices()[index]
            .dependencies()
            .iter()
            .map(|id| id.index())
            .collect()
    }

    #[test]
    fn builds_one_vertex_per_transaction_in_order() {
        let txs = vec![
            Transaction::new("b").with_output("b0"),
            Transaction::new("a").with_input("b0"),
        ];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.vertices()[0].id().as_str(), "b");
        assert_eq!(deps(&graph, 1), vec![0]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn dependencies_follow_input_declaration_order() {
        let txs = vec![
            Transaction::new("p").with_output("p0"),
            Transaction::new("q").with_output("q0"),
            Transaction::new("r").with_input("q0").with_input("p0"),
        ];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert_eq!(deps(&graph, 2), vec![1, 0]);
    }

    #[test]
    fn producer_may_follow_consumer_in_list() {
        let txs = vec![
            Transaction::new("child").with_input("parentOut"),
            Transaction::new("parent").with_output("parentOut"),
        ];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert_eq!(deps(&graph, 0), vec![1]);
    }

    #[test]
    fn unresolved_input_adds_no_edge() {
        let txs = vec![Transaction::new("orphan").with_input("nowhere")];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert!(graph.vertices()[0].dependencies().is_empty());
        assert_eq!(graph.vertices()[0].input_addresses().len(), 1);
    }

    #[test]
    fn no_substring_matches() {
        let txs = vec![
            Transaction::new("a").with_output("tx1Out").with_output("tx2Out"),
            Transaction::new("b").with_input("Outtx2"),
            Transaction::new("c").with_input("tx1"),
        ];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_spend_links_to_itself() {
        let txs = vec![Transaction::new("loop").with_input("loop0").with_output("loop0")];
        let graph = GraphBuilder::build(&txs).unwrap();
        assert_eq!(deps(&graph, 0), vec![0]);
    }

    #[test]
    fn validation_failure_builds_nothing() {
        let txs = vec![
            Transaction::new("a").with_output("x"),
            Transaction::new("b").with_output("x"),
        ];
        assert!(matches!(
            GraphBuilder::build(&txs),
            Err(LineageError::DuplicateOutput { .. })
        ));
    }
}
