//! Dependency graph and ancestry resolution for ledger transactions.
//!
//! Given a closed set of transactions whose inputs spend addresses created by
//! other transactions' outputs, this crate links each transaction to the
//! producers of its inputs and answers two queries: the immediate producers
//! of a transaction, and its full upstream closure (every ancestor needed to
//! account for its inputs, in dependency order).
//!
//! Construction runs the [`UniquenessValidator`] and then the
//! [`GraphBuilder`]; queries run the [`AncestryResolver`] against the
//! resulting immutable [`DependencyGraph`]. [`TransactionProcessor`] bundles
//! the three.

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod processor;
pub mod resolver;
pub mod validation;
pub mod vertex;

pub use builder::GraphBuilder;
pub use config::{ResolverConfig, TraversalMode};
pub use error::{LineageError, LineageResult};
pub use graph::DependencyGraph;
pub use processor::TransactionProcessor;
pub use resolver::AncestryResolver;
pub use validation::{UniquenessReport, UniquenessValidator, Violation, ViolationKind};
pub use vertex::{Vertex, VertexId};
