//! The schema metadata model.
//!
//! The catalog holds the object graph rebuilt from catalog rows: domains,
//! relations with their columns, and the key constraints tying them together.

mod constraint;
mod field;
mod relation;
mod schema;

pub use constraint::{FkConstraint, RelationConstraint};
pub use field::Field;
pub use relation::{Relation, RelationField};
pub use schema::{DbSchema, LoadOptions};
