//! Catalog row contracts for relcat.
//!
//! This crate defines the shapes of the three flat row sets a metadata query
//! layer must supply to rebuild a schema: domain rows, relation-field rows,
//! and relation-constraint rows. It also carries the value vocabulary those
//! rows use (numeric SQL type codes, referential actions, constraint kinds)
//! together with the parsing for the catalog spellings of that vocabulary.
//!
//! # Modules
//!
//! - [`row`] - The three catalog row shapes
//! - [`types`] - Value vocabulary shared by rows and the schema model
//! - [`error`] - Vocabulary parse errors
//!
//! The crate performs no I/O: issuing the catalog queries and mapping raw
//! driver values into these rows is the caller's job. All row types derive
//! serde traits so row sets can cross process boundaries as JSON.

pub mod error;
pub mod row;
pub mod types;

pub use error::Error;

// Re-export commonly used types at crate root
pub use row::{ConstraintRow, DomainRow, RelationFieldRow};
pub use types::{ConstraintKind, RefRule, SqlType};
