//! Graph vertices.
//!
//! Each [`Vertex`] wraps one transaction of the set and records the vertices
//! whose outputs satisfy its inputs. Vertices are created once by the
//! builder and never change afterwards.

use std::collections::HashSet;
use std::fmt;

use lineage_types::{Address, Transaction, TxId};

/// Position of a vertex in its graph (equal to the transaction's position in
/// the list the graph was built from).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A transaction in the dependency graph.
#[derive(Clone, Debug)]
pub struct Vertex<'a> {
    transaction: &'a Transaction,
    input_addresses: Vec<Address>,
    output_addresses: HashSet<Address>,
    dependencies: Vec<VertexId>,
}

impl<'a> Vertex<'a> {
    pub(crate) fn new(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            input_addresses: transaction.input_addresses().cloned().collect(),
            output_addresses: transaction.output_addresses().cloned().collect(),
            dependencies: Vec::new(),
        }
    }

    pub(crate) fn add_dependency(&mut self, producer: VertexId) {
        self.dependencies.push(producer);
    }

    pub fn transaction(&self) -> &'a Transaction {
        self.transaction
    }

    pub fn id(&self) -> &'a TxId {
        self.transaction.id()
    }

    /// Input addresses in declaration order.
    pub fn input_addresses(&self) -> &[Address] {
        &self.input_addresses
    }

    pub fn output_addresses(&self) -> &HashSet<Address> {
        &self.output_addresses
    }

    /// Producers of this vertex's inputs, in input declaration order.
    pub fn dependencies(&self) -> &[VertexId] {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_addresses_from_transaction() {
        let tx = Transaction::new("tx5")
            .with_input("tx2Out1")
            .with_input("tx4Out1")
            .with_output("tx5Out");
        let vertex = Vertex::new(&tx);
        assert_eq!(vertex.id().as_str(), "tx5");
        assert_eq!(
            vertex.input_addresses(),
            &[Address::from("tx2Out1"), Address::from("tx4Out1")]
        );
        assert!(vertex.dependencies().is_empty());
    }

    #[test]
    fn output_set_matches_exact_address_only() {
        let tx = Transaction::new("tx2")
            .with_output("tx2Out1")
            .with_output("tx2Out2");
        let vertex = Vertex::new(&tx);
        let outputs = vertex.output_addresses();
        assert!(outputs.contains("tx2Out1"));
        assert!(!outputs.contains("tx2Out"));
        assert!(!outputs.contains("Out1tx2Out2"));
    }

    #[test]
    fn dependencies_keep_insertion_order() {
        let tx = Transaction::new("tx2").with_input("tx1Out");
        let mut vertex = Vertex::new(&tx);
        vertex.add_dependency(VertexId(4));
        vertex.add_dependency(VertexId(0));
        assert_eq!(vertex.dependencies(), &[VertexId(4), VertexId(0)]);
    }

    #[test]
    fn vertex_id_display() {
        assert_eq!(VertexId(3).to_string(), "v3");
        assert_eq!(VertexId(3).index(), 3);
    }
}
