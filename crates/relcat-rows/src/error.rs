//! Row vocabulary error types.

use thiserror::Error;

/// Errors raised while mapping raw catalog values into the row vocabulary.
#[derive(Debug, Error)]
pub enum Error {
    /// Referential action spelling outside the catalog vocabulary.
    #[error("unknown referential action: {0:?}")]
    UnknownRule(String),

    /// Constraint type spelling outside the catalog vocabulary.
    #[error("unknown constraint kind: {0:?}")]
    UnknownConstraintKind(String),
}
