//! The engine callers construct: validate once, build once, query many times.

use lineage_types::Transaction;

use crate::builder::GraphBuilder;
use crate::config::ResolverConfig;
use crate::error::{LineageError, LineageResult};
use crate::graph::DependencyGraph;
use crate::resolver::AncestryResolver;
use crate::vertex::VertexId;

/// Traces the origin of each transaction's inputs within a fixed set.
///
/// Construction validates the set and builds the dependency graph; failed
/// construction leaves nothing behind. Queries borrow the processor
/// immutably, so one processor can serve several threads at once.
#[derive(Clone, Debug)]
pub struct TransactionProcessor<'a> {
    graph: DependencyGraph<'a>,
    config: ResolverConfig,
}

impl<'a> TransactionProcessor<'a> {
    /// Build a processor with the default [`ResolverConfig`].
    pub fn new(transactions: &'a [Transaction]) -> LineageResult<Self> {
        Self::with_config(transactions, ResolverConfig::default())
    }

    pub fn with_config(
        transactions: &'a [Transaction],
        config: ResolverConfig,
    ) -> LineageResult<Self> {
        let graph = GraphBuilder::build(transactions)?;
        Ok(Self { graph, config })
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn graph(&self) -> &DependencyGraph<'a> {
        &self.graph
    }

    /// Transactions that spend nothing, in list order.
    pub fn origins(&self) -> Vec<&'a Transaction> {
        self.graph.origins().map(|v| v.transaction()).collect()
    }

    /// Immediate dependencies of the transaction at `index` in the original
    /// list, or `None` if the index is out of range.
    pub fn dependencies_at(&self, index: usize) -> Option<Vec<&'a Transaction>> {
        self.resolver()
            .immediate_dependencies(VertexId(index))
            .ok()
    }

    /// Transactions whose outputs `tx`'s inputs spend, in input order.
    pub fn immediate_dependencies(&self, tx: &Transaction) -> LineageResult<Vec<&'a Transaction>> {
        let vertex = self.locate(tx)?;
        self.resolver().immediate_dependencies(vertex)
    }

    /// `tx` and all of its ancestors, ancestors first and `tx` last.
    pub fn upstream_closure(&self, tx: &Transaction) -> LineageResult<Vec<&'a Transaction>> {
        let vertex = self.locate(tx)?;
        self.resolver().upstream_closure(vertex)
    }

    fn resolver(&self) -> AncestryResolver<'_, 'a> {
        AncestryResolver::new(&self.graph, self.config.mode)
    }

    fn locate(&self, tx: &Transaction) -> LineageResult<VertexId> {
        self.graph
            .locate(tx)
            .ok_or_else(|| LineageError::TransactionNotFound(tx.id().clone()))
    }
}
