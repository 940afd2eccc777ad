//! Transaction records.
//!
//! A [`Transaction`] consumes addresses through its [`TxInput`]s and produces
//! addresses through its [`TxOutput`]s. Declaration order of both lists is
//! preserved; the graph engine relies on input order for dependency order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{Address, TxId};

/// An input spending the output at `address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    pub address: Address,
}

impl TxInput {
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// An output created at `address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: Address,
}

impl TxOutput {
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// A ledger transaction: an identity plus ordered inputs and outputs.
///
/// Equality is structural over the id, inputs, and outputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    id: TxId,
    #[serde(default)]
    inputs: Vec<TxInput>,
    #[serde(default)]
    outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Create a transaction with no inputs or outputs.
    pub fn new(id: impl Into<TxId>) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Append an input and return the transaction.
    #[must_use]
    pub fn with_input(mut self, address: impl Into<Address>) -> Self {
        self.add_input(address);
        self
    }

    /// Append an output and return the transaction.
    #[must_use]
    pub fn with_output(mut self, address: impl Into<Address>) -> Self {
        self.add_output(address);
        self
    }

    pub fn add_input(&mut self, address: impl Into<Address>) {
        self.inputs.push(TxInput::new(address));
    }

    pub fn add_output(&mut self, address: impl Into<Address>) {
        self.outputs.push(TxOutput::new(address));
    }

    pub fn id(&self) -> &TxId {
        &self.id
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// Input addresses in declaration order.
    pub fn input_addresses(&self) -> impl Iterator<Item = &Address> + '_ {
        self.inputs.iter().map(|input| &input.address)
    }

    /// Output addresses in declaration order.
    pub fn output_addresses(&self) -> impl Iterator<Item = &Address> + '_ {
        self.outputs.iter().map(|output| &output.address)
    }

    /// Returns `true` if this transaction spends nothing.
    pub fn is_origin(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} in, {} out)",
            self.id,
            self.inputs.len(),
            self.outputs.len()
        )
    }
}
