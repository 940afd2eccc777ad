use std::collections::HashMap;

use lineage_types::{Address, Transaction, TxId};

use crate::error::{LineageError, LineageResult};

/// Result of checking a transaction set for uniqueness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniquenessReport {
    pub transaction_count: usize,
    /// Violations in priority order: duplicate outputs, then reused inputs,
    /// then duplicate ids. Within a kind, ordered by the second occurrence.
    pub violations: Vec<Violation>,
}

impl UniquenessReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of a single kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.kind() == kind)
    }
}

/// A single uniqueness violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    DuplicateOutput {
        address: Address,
        first: TxId,
        second: TxId,
    },
    OutputReused {
        address: Address,
        first: TxId,
        second: TxId,
    },
    DuplicateTransaction {
        id: TxId,
    },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::DuplicateOutput { .. } => ViolationKind::DuplicateOutput,
            Self::OutputReused { .. } => ViolationKind::OutputReused,
            Self::DuplicateTransaction { .. } => ViolationKind::DuplicateTransaction,
        }
    }
}

impl From<Violation> for LineageError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::DuplicateOutput {
                address,
                first,
                second,
            } => Self::DuplicateOutput {
                address,
                first,
                second,
            },
            Violation::OutputReused {
                address,
                first,
                second,
            } => Self::OutputReused {
                address,
                first,
                second,
            },
            Violation::DuplicateTransaction { id } => Self::DuplicateTransaction(id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    DuplicateOutput,
    OutputReused,
    DuplicateTransaction,
}

/// Global uniqueness checks that must hold before a graph is built.
pub struct UniquenessValidator;

impl UniquenessValidator {
    /// Fail with the highest-priority violation, if any.
    pub fn validate(transactions: &[Transaction]) -> LineageResult<()> {
        match Self::report(transactions).violations.into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }

    /// Collect every violation without failing.
    pub fn report(transactions: &[Transaction]) -> UniquenessReport {
        let mut violations = Vec::new();

        let mut producers: HashMap<&Address, &TxId> = HashMap::new();
        for tx in transactions {
            for address in tx.output_addresses() {
                if let Some(first) = producers.get(address) {
                    violations.push(Violation::DuplicateOutput {
                        address: address.clone(),
                        first: (*first).clone(),
                        second: tx.id().clone(),
                    });
                } else {
                    producers.insert(address, tx.id());
                }
            }
        }

        let mut spenders: HashMap<&Address, &TxId> = HashMap::new();
        for tx in transactions {
            for address in tx.input_addresses() {
                if let Some(first) = spenders.get(address) {
                    violations.push(Violation::OutputReused {
                        address: address.clone(),
                        first: (*first).clone(),
                        second: tx.id().clone(),
                    });
                } else {
                    spenders.insert(address, tx.id());
                }
            }
        }

        let mut seen: HashMap<&TxId, usize> = HashMap::new();
        for tx in transactions {
            let count = seen.entry(tx.id()).or_default();
            *count += 1;
            if *count == 2 {
                violations.push(Violation::DuplicateTransaction {
                    id: tx.id().clone(),
                });
            }
        }

        UniquenessReport {
            transaction_count: transactions.len(),
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Transaction> {
        vec![
            Transaction::new("tx1").with_output("tx1Out"),
            Transaction::new("tx2")
                .with_input("tx1Out")
                .with_output("tx2Out1")
                .with_output("tx2Out2"),
            Transaction::new("tx3").with_output("tx3Out"),
        ]
    }

    #[test]
    fn valid_set_passes() {
        let txs = fixture();
        assert!(UniquenessValidator::validate(&txs).is_ok());
        let report = UniquenessValidator::report(&txs);
        assert!(report.is_valid());
        assert_eq!(report.transaction_count, 3);
    }

    #[test]
    fn empty_set_is_valid() {
        assert!(UniquenessValidator::validate(&[]).is_ok());
    }

    #[test]
    fn duplicate_output_is_rejected() {
        let mut txs = fixture();
        txs[2].add_output("tx1Out");
        assert_eq!(
            UniquenessValidator::validate(&txs),
            Err(LineageError::DuplicateOutput {
                address: "tx1Out".into(),
                first: "tx1".into(),
                second: "tx3".into(),
            })
        );
    }

    #[test]
    fn duplicate_output_within_one_transaction_is_rejected() {
        let mut txs = fixture();
        txs[1].add_output("tx2Out2");
        assert!(matches!(
            UniquenessValidator::validate(&txs),
            Err(LineageError::DuplicateOutput { .. })
        ));
    }

    #[test]
    fn reused_input_is_rejected() {
        let mut txs = fixture();
        txs[2].add_input("tx1Out");
        assert_eq!(
            UniquenessValidator::validate(&txs),
            Err(LineageError::OutputReused {
                address: "tx1Out".into(),
                first: "tx2".into(),
                second: "tx3".into(),
            })
        );
    }

    #[test]
    fn duplicate_output_takes_precedence_over_reuse() {
        let mut txs = fixture();
        txs[2].add_input("tx1Out");
        txs[2].add_output("tx2Out1");
        assert!(matches!(
            UniquenessValidator::validate(&txs),
            Err(LineageError::DuplicateOutput { .. })
        ));
        let report = UniquenessValidator::report(&txs);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.of_kind(ViolationKind::OutputReused).count(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected_after_address_checks() {
        let mut txs = fixture();
        txs.push(Transaction::new("tx3"));
        assert_eq!(
            UniquenessValidator::validate(&txs),
            Err(LineageError::DuplicateTransaction("tx3".into()))
        );
    }

    #[test]
    fn report_lists_every_violation_once_per_extra_occurrence() {
        let txs = vec![
            Transaction::new("a").with_output("x"),
            Transaction::new("b").with_output("x"),
            Transaction::new("c").with_output("x"),
            Transaction::new("c"),
            Transaction::new("c"),
        ];
        let report = UniquenessValidator::report(&txs);
        assert_eq!(report.of_kind(ViolationKind::DuplicateOutput).count(), 2);
        assert_eq!(report.of_kind(ViolationKind::DuplicateTransaction).count(), 1);
        assert_eq!(
            report.violations[1],
            Violation::DuplicateOutput {
                address: "x".into(),
                first: "a".into(),
                second: "c".into(),
            }
        );
    }
}
