//! The three catalog row shapes.
//!
//! Each struct mirrors one row of the corresponding metadata query after the
//! driver layer has mapped raw column values (numeric type codes, 0|1 null
//! flags, padded rule spellings) into the typed vocabulary.

use serde::{Deserialize, Serialize};

use crate::types::{ConstraintKind, RefRule, SqlType};

/// One row of the domain query: a reusable column type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRow {
    /// Domain name.
    pub name: String,
    /// SQL type of the domain.
    pub field_type: SqlType,
    /// Whether the domain rejects NULL.
    pub not_null: bool,
    /// Raw DEFAULT clause text, if declared.
    pub default_source: Option<String>,
    /// Storage length in bytes.
    pub length: i16,
    /// Numeric scale.
    pub scale: i16,
    /// Raw CHECK clause text, if declared.
    pub validation_source: Option<String>,
    /// Type sub-code (character set or blob sub-type), if any.
    pub sub_type: Option<i16>,
    /// Numeric precision.
    pub precision: i16,
}

impl DomainRow {
    /// Create a domain row with the given type and length; everything else
    /// defaults to the catalog's absent values.
    pub fn new(name: impl Into<String>, field_type: SqlType, length: i16) -> Self {
        Self {
            name: name.into(),
            field_type,
            not_null: false,
            default_source: None,
            length,
            scale: 0,
            validation_source: None,
            sub_type: None,
            precision: 0,
        }
    }

    /// Mark the domain NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the raw DEFAULT clause text.
    pub fn with_default(mut self, source: impl Into<String>) -> Self {
        self.default_source = Some(source.into());
        self
    }

    /// Set the raw CHECK clause text.
    pub fn with_validation(mut self, source: impl Into<String>) -> Self {
        self.validation_source = Some(source.into());
        self
    }

    /// Set the numeric scale.
    pub fn with_scale(mut self, scale: i16) -> Self {
        self.scale = scale;
        self
    }

    /// Set the numeric precision.
    pub fn with_precision(mut self, precision: i16) -> Self {
        self.precision = precision;
        self
    }

    /// Set the type sub-code.
    pub fn with_sub_type(mut self, sub_type: i16) -> Self {
        self.sub_type = Some(sub_type);
        self
    }
}

/// One row of the relation-field query: a column bound to a table.
///
/// The query returns these sorted ascending by relation name; the schema
/// load relies on that order and does not re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationFieldRow {
    /// Owning relation name.
    pub relation_name: String,
    /// Column name.
    pub field_name: String,
    /// Name of the underlying domain.
    pub field_source: String,
    /// Column-level NOT NULL flag.
    pub not_null: bool,
    /// Column-level DEFAULT override, if declared.
    pub default_source: Option<String>,
}

impl RelationFieldRow {
    /// Create a nullable column row with no default.
    pub fn new(
        relation_name: impl Into<String>,
        field_name: impl Into<String>,
        field_source: impl Into<String>,
    ) -> Self {
        Self {
            relation_name: relation_name.into(),
            field_name: field_name.into(),
            field_source: field_source.into(),
            not_null: false,
            default_source: None,
        }
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the column-level DEFAULT override.
    pub fn with_default(mut self, source: impl Into<String>) -> Self {
        self.default_source = Some(source.into());
        self
    }
}

/// One row of the relation-constraint query: one column of one named
/// constraint, joined with its index segment and (for foreign keys) the
/// referenced constraint.
///
/// The query returns these sorted by relation name, then constraint name,
/// then field position; composite constraints arrive as consecutive rows.
/// The three reference members are present exactly on FOREIGN KEY rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRow {
    /// Owning relation name.
    pub relation_name: String,
    /// Constraint name.
    pub constraint_name: String,
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Name of the unique or primary-key constraint a foreign key references.
    pub references_constraint: Option<String>,
    /// Action on update of the referenced row (foreign keys only).
    pub update_rule: Option<RefRule>,
    /// Action on delete of the referenced row (foreign keys only).
    pub delete_rule: Option<RefRule>,
    /// Name of the backing index.
    pub index_name: String,
    /// Column name at this position of the constraint.
    pub field_name: String,
}

impl ConstraintRow {
    /// Create a constraint row of an arbitrary kind with no foreign-key
    /// reference members.
    pub fn new(
        relation_name: impl Into<String>,
        constraint_name: impl Into<String>,
        kind: ConstraintKind,
        index_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            relation_name: relation_name.into(),
            constraint_name: constraint_name.into(),
            kind,
            references_constraint: None,
            update_rule: None,
            delete_rule: None,
            index_name: index_name.into(),
            field_name: field_name.into(),
        }
    }

    /// Create a PRIMARY KEY row.
    pub fn primary_key(
        relation_name: impl Into<String>,
        constraint_name: impl Into<String>,
        index_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self::new(
            relation_name,
            constraint_name,
            ConstraintKind::PrimaryKey,
            index_name,
            field_name,
        )
    }

    /// Create a UNIQUE row.
    pub fn unique(
        relation_name: impl Into<String>,
        constraint_name: impl Into<String>,
        index_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self::new(
            relation_name,
            constraint_name,
            ConstraintKind::Unique,
            index_name,
            field_name,
        )
    }

    /// Create a FOREIGN KEY row with its reference members.
    pub fn foreign_key(
        relation_name: impl Into<String>,
        constraint_name: impl Into<String>,
        index_name: impl Into<String>,
        field_name: impl Into<String>,
        references_constraint: impl Into<String>,
        update_rule: RefRule,
        delete_rule: RefRule,
    ) -> Self {
        let mut row = Self::new(
            relation_name,
            constraint_name,
            ConstraintKind::ForeignKey,
            index_name,
            field_name,
        );
        row.references_constraint = Some(references_constraint.into());
        row.update_rule = Some(update_rule);
        row.delete_rule = Some(delete_rule);
        row
    }
}
