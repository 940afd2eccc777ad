use serde::{Deserialize, Serialize};

/// How the ancestry resolver orders an upstream closure and what it treats
/// as a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// Reverse discovery order. A dependency that was already discovered is
    /// reported as a cycle once it closes the current vertex's input list,
    /// which also rejects reconverging (diamond) shapes.
    #[default]
    Compatible,
    /// Post-order depth-first traversal. Only a dependency still on the
    /// active path is a cycle, so diamonds resolve normally.
    Topological,
}

/// Configuration for upstream closure queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Ordering and cycle rule used by `upstream_closure`.
    #[serde(default)]
    pub mode: TraversalMode,
}

impl ResolverConfig {
    /// Reverse-discovery ordering with the strict revisit rule.
    pub fn compatible() -> Self {
        Self {
            mode: TraversalMode::Compatible,
        }
    }

    /// True topological ordering that accepts reconverging DAGs.
    pub fn topological() -> Self {
        Self {
            mode: TraversalMode::Topological,
        }
    }
}
