//! Core error types.

use thiserror::Error;

/// Schema load and lookup errors.
///
/// All of these are fatal to the metadata refresh that raised them; there is
/// nothing transient to retry in a pure fold over already-fetched rows.
#[derive(Debug, Error)]
pub enum Error {
    /// A constraint row names a relation absent from the loaded relations.
    #[error("constraint {constraint} references unknown relation {relation}")]
    UnknownRelation {
        /// Relation name the row carried.
        relation: String,
        /// Constraint the row belongs to.
        constraint: String,
    },

    /// Lookup of a unique or primary-key constraint name no relation owns.
    #[error("unknown unique constraint: {0}")]
    UnknownUniqueConstraint(String),

    /// A FOREIGN KEY row arrived without its referenced constraint or
    /// referential actions.
    #[error("foreign key {constraint} is missing its referenced constraint or rules")]
    IncompleteForeignKey {
        /// The foreign-key constraint name.
        constraint: String,
    },

    /// Relation-field rows were not sorted by relation name
    /// (only raised with ordering verification enabled).
    #[error("relation field row {index} out of order: {relation}")]
    UnsortedRelationFields {
        /// Index of the offending row.
        index: usize,
        /// Relation name of the offending row.
        relation: String,
    },

    /// Constraint rows were not sorted by relation and constraint name
    /// (only raised with ordering verification enabled).
    #[error("constraint row {index} out of order: {relation}.{constraint}")]
    UnsortedConstraints {
        /// Index of the offending row.
        index: usize,
        /// Relation name of the offending row.
        relation: String,
        /// Constraint name of the offending row.
        constraint: String,
    },
}
