//! relcat core - the in-memory relational schema model.
//!
//! This crate rebuilds a database's structure from the three flat row sets a
//! metadata query layer supplies: domain definitions, relation fields, and
//! relation constraints. The result is an owned, queryable object graph of
//! domains, tables, columns and key constraints; issuing the queries and
//! executing any DDL stay with the caller.

pub mod catalog;
pub mod diff;
pub mod error;

pub use catalog::{
    DbSchema, Field, FkConstraint, LoadOptions, Relation, RelationConstraint, RelationField,
};
pub use diff::{ConstraintChange, DomainChange, FieldChange, RelationChange, SchemaDiff};
pub use error::Error;

/// Re-export the catalog row contract.
pub use relcat_rows as rows;
