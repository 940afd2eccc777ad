//! Transaction record types for ledger lineage resolution.
//!
//! These are plain data holders consumed by `lineage-dag`. A [`Transaction`]
//! exposes an ordered list of input addresses and an ordered list of output
//! addresses; the graph engine links the two.
//!
//! # Key Types
//!
//! - [`TxId`] — Opaque transaction identity
//! - [`Address`] — Opaque output address, matched by exact string equality
//! - [`Transaction`] — Ordered inputs and outputs under a [`TxId`]

pub mod address;
pub mod transaction;

pub use address::{Address, TxId};
pub use transaction::{Transaction, TxInput, TxOutput};
