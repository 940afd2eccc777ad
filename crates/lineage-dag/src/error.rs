//! Error types for the lineage graph.

use lineage_types::{Address, TxId};

use crate::vertex::VertexId;

/// Errors that can occur while building the graph or resolving ancestry.
///
/// Every variant describes a structural defect in the transaction set (or a
/// caller precondition violation), so none of them are worth retrying.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineageError {
    /// Two transactions produce the same output address.
    #[error("duplicate output {address}: produced by both {first} and {second}")]
    DuplicateOutput {
        /// The address produced twice.
        address: Address,
        /// The first producer in list order.
        first: TxId,
        /// The second producer in list order.
        second: TxId,
    },

    /// Two inputs spend the same address.
    #[error("output {address} reused: spent by both {first} and {second}")]
    OutputReused {
        /// The address spent twice.
        address: Address,
        /// The first spender in list order.
        first: TxId,
        /// The second spender in list order.
        second: TxId,
    },

    /// The same transaction id appears more than once in the set.
    #[error("duplicate transaction: {0}")]
    DuplicateTransaction(TxId),

    /// The dependencies reachable from a query root form a cycle.
    #[error("cycle detected at transaction {0}")]
    CycleDetected(TxId),

    /// A reachable transaction spends an address no transaction produces.
    #[error("missing transaction: {transaction} spends {address}, which no known transaction produces")]
    MissingTransaction {
        /// The transaction with the unresolved input.
        transaction: TxId,
        /// The first unresolved input address.
        address: Address,
    },

    /// The queried transaction is not part of the graph.
    #[error("transaction not found: {0}")]
    TransactionNotFound(TxId),

    /// A vertex id outside the queried graph.
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),
}

/// Convenience alias for lineage results.
pub type LineageResult<T> = Result<T, LineageError>;
