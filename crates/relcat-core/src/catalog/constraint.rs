//! Key constraint definitions.

use relcat_rows::RefRule;
use serde::{Deserialize, Serialize};

/// A named key constraint over an ordered list of columns.
///
/// The column list grows one row at a time while the schema loads and is
/// read-only afterward. Order equals the ordinal position of each column in
/// the backing index; it is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationConstraint {
    name: String,
    index_name: String,
    fields: Vec<String>,
}

impl RelationConstraint {
    pub(crate) fn new(
        name: impl Into<String>,
        index_name: impl Into<String>,
        first_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            index_name: index_name.into(),
            fields: vec![first_field.into()],
        }
    }

    /// Append the next column of a composite constraint.
    pub(crate) fn push_field(&mut self, field: impl Into<String>) {
        self.fields.push(field.into());
    }

    /// Constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the backing index.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Column names in index segment order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A foreign key: an ordered column list plus the unique constraint it
/// references and its referential actions.
///
/// The reference members are frozen from the first catalog row of the
/// constraint; later rows of a composite key only contribute columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FkConstraint {
    key: RelationConstraint,
    references_constraint: String,
    update_rule: RefRule,
    delete_rule: RefRule,
}

impl FkConstraint {
    pub(crate) fn new(
        name: impl Into<String>,
        index_name: impl Into<String>,
        first_field: impl Into<String>,
        references_constraint: impl Into<String>,
        update_rule: RefRule,
        delete_rule: RefRule,
    ) -> Self {
        Self {
            key: RelationConstraint::new(name, index_name, first_field),
            references_constraint: references_constraint.into(),
            update_rule,
            delete_rule,
        }
    }

    pub(crate) fn push_field(&mut self, field: impl Into<String>) {
        self.key.push_field(field);
    }

    /// Constraint name.
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// Name of the backing index.
    pub fn index_name(&self) -> &str {
        self.key.index_name()
    }

    /// Column names in index segment order.
    pub fn fields(&self) -> &[String] {
        self.key.fields()
    }

    /// Name of the unique or primary-key constraint this key references.
    pub fn references_constraint(&self) -> &str {
        &self.references_constraint
    }

    /// Action on update of the referenced row.
    pub fn update_rule(&self) -> RefRule {
        self.update_rule
    }

    /// Action on delete of the referenced row.
    pub fn delete_rule(&self) -> RefRule {
        self.delete_rule
    }
}
