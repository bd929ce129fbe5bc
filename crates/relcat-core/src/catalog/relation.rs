//! Relation (table) definitions.

use indexmap::IndexMap;
use relcat_rows::{ConstraintKind, ConstraintRow, RelationFieldRow};
use serde::{Deserialize, Serialize};

use super::constraint::{FkConstraint, RelationConstraint};
use crate::error::Error;

/// A column as bound to one specific relation.
///
/// References its domain by name and may tighten the domain's nullability or
/// override its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationField {
    /// Column name.
    pub name: String,
    /// Name of the underlying domain.
    pub field_source: String,
    /// Column-level NOT NULL flag.
    pub not_null: bool,
    /// Column-level DEFAULT override, if declared.
    pub default_source: Option<String>,
}

impl From<&RelationFieldRow> for RelationField {
    fn from(row: &RelationFieldRow) -> Self {
        Self {
            name: row.field_name.clone(),
            field_source: row.field_source.clone(),
            not_null: row.not_null,
            default_source: row.default_source.clone(),
        }
    }
}

/// One table of the schema: its columns and key constraints.
///
/// Accumulates state row by row while the schema loads; afterwards only the
/// read accessors matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    name: String,
    fields: IndexMap<String, RelationField>,
    primary_key: Option<RelationConstraint>,
    foreign_keys: IndexMap<String, FkConstraint>,
    unique: IndexMap<String, RelationConstraint>,
}

impl Relation {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            primary_key: None,
            foreign_keys: IndexMap::new(),
            unique: IndexMap::new(),
        }
    }

    /// Relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns keyed by name, in catalog order.
    pub fn fields(&self) -> &IndexMap<String, RelationField> {
        &self.fields
    }

    /// Look up one column by name.
    pub fn field(&self, name: &str) -> Option<&RelationField> {
        self.fields.get(name)
    }

    /// The primary key, if the relation has one.
    pub fn primary_key(&self) -> Option<&RelationConstraint> {
        self.primary_key.as_ref()
    }

    /// Check if the relation has a primary key.
    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Foreign keys keyed by constraint name.
    pub fn foreign_keys(&self) -> &IndexMap<String, FkConstraint> {
        &self.foreign_keys
    }

    /// Unique constraints keyed by constraint name.
    pub fn unique_constraints(&self) -> &IndexMap<String, RelationConstraint> {
        &self.unique
    }

    /// Fold one relation-field row into the column map.
    pub(crate) fn load_field(&mut self, row: &RelationFieldRow) {
        let field = RelationField::from(row);
        self.fields.insert(field.name.clone(), field);
    }

    /// Fold one constraint row into the PK, FK or unique collections.
    ///
    /// The first row of a constraint creates it; consecutive rows of a
    /// composite constraint extend the existing column list. A relation keeps
    /// at most one primary key: further PRIMARY KEY rows extend it no matter
    /// what constraint name they carry.
    pub(crate) fn load_constraint_field(&mut self, row: &ConstraintRow) -> Result<(), Error> {
        match row.kind {
            ConstraintKind::PrimaryKey => match self.primary_key.as_mut() {
                Some(pk) => pk.push_field(row.field_name.clone()),
                None => {
                    self.primary_key = Some(RelationConstraint::new(
                        row.constraint_name.clone(),
                        row.index_name.clone(),
                        row.field_name.clone(),
                    ));
                }
            },
            ConstraintKind::ForeignKey => match self.foreign_keys.get_mut(&row.constraint_name) {
                Some(fk) => fk.push_field(row.field_name.clone()),
                None => {
                    let (references, update_rule, delete_rule) = match (
                        row.references_constraint.as_ref(),
                        row.update_rule,
                        row.delete_rule,
                    ) {
                        (Some(references), Some(update), Some(delete)) => {
                            (references.clone(), update, delete)
                        }
                        _ => {
                            return Err(Error::IncompleteForeignKey {
                                constraint: row.constraint_name.clone(),
                            })
                        }
                    };
                    self.foreign_keys.insert(
                        row.constraint_name.clone(),
                        FkConstraint::new(
                            row.constraint_name.clone(),
                            row.index_name.clone(),
                            row.field_name.clone(),
                            references,
                            update_rule,
                            delete_rule,
                        ),
                    );
                }
            },
            ConstraintKind::Unique => match self.unique.get_mut(&row.constraint_name) {
                Some(uq) => uq.push_field(row.field_name.clone()),
                None => {
                    self.unique.insert(
                        row.constraint_name.clone(),
                        RelationConstraint::new(
                            row.constraint_name.clone(),
                            row.index_name.clone(),
                            row.field_name.clone(),
                        ),
                    );
                }
            },
            // CHECK and NOT NULL rows carry no key columns
            ConstraintKind::Check | ConstraintKind::NotNull => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use relcat_rows::RefRule;

    use super::*;

    #[test]
    fn test_load_field_keeps_catalog_order() {
        let mut relation = Relation::new("CUSTOMER");
        relation.load_field(&RelationFieldRow::new("CUSTOMER", "ID", "D_ID").not_null());
        relation.load_field(&RelationFieldRow::new("CUSTOMER", "NAME", "D_NAME"));
        relation.load_field(&RelationFieldRow::new("CUSTOMER", "EMAIL", "D_EMAIL"));

        let names: Vec<_> = relation.fields().keys().cloned().collect();
        assert_eq!(names, ["ID", "NAME", "EMAIL"]);
        assert_eq!(relation.field("NAME").unwrap().field_source, "D_NAME");
        assert!(relation.field("MISSING").is_none());
    }

    #[test]
    fn test_primary_key_grows_across_rows() {
        let mut relation = Relation::new("ORDER_LINE");
        relation
            .load_constraint_field(&ConstraintRow::primary_key(
                "ORDER_LINE",
                "PK_ORDER_LINE",
                "PK_ORDER_LINE_IDX",
                "ORDER_ID",
            ))
            .unwrap();
        relation
            .load_constraint_field(&ConstraintRow::primary_key(
                "ORDER_LINE",
                "PK_ORDER_LINE",
                "PK_ORDER_LINE_IDX",
                "LINE_NO",
            ))
            .unwrap();

        let pk = relation.primary_key().unwrap();
        assert_eq!(pk.name(), "PK_ORDER_LINE");
        assert_eq!(pk.fields(), ["ORDER_ID", "LINE_NO"]);
    }

    #[test]
    fn test_second_primary_key_name_never_creates_a_new_key() {
        let mut relation = Relation::new("T");
        relation
            .load_constraint_field(&ConstraintRow::primary_key("T", "PK_A", "PK_A_IDX", "X"))
            .unwrap();
        relation
            .load_constraint_field(&ConstraintRow::primary_key("T", "PK_B", "PK_B_IDX", "Y"))
            .unwrap();

        let pk = relation.primary_key().unwrap();
        assert_eq!(pk.name(), "PK_A");
        assert_eq!(pk.fields(), ["X", "Y"]);
    }

    #[test]
    fn test_foreign_key_create_then_append() {
        let mut relation = Relation::new("LINE");
        relation
            .load_constraint_field(&ConstraintRow::foreign_key(
                "LINE",
                "FK_LINE",
                "FK_LINE_IDX",
                "ORDER_ID",
                "PK_ORDERS",
                RefRule::NoAction,
                RefRule::Cascade,
            ))
            .unwrap();
        relation
            .load_constraint_field(&ConstraintRow::foreign_key(
                "LINE",
                "FK_LINE",
                "FK_LINE_IDX",
                "ORDER_VERSION",
                "PK_ORDERS",
                RefRule::NoAction,
                RefRule::Cascade,
            ))
            .unwrap();

        let fk = &relation.foreign_keys()["FK_LINE"];
        assert_eq!(fk.fields(), ["ORDER_ID", "ORDER_VERSION"]);
        assert_eq!(fk.delete_rule(), RefRule::Cascade);
    }

    #[test]
    fn test_incomplete_foreign_key_rejected() {
        let mut relation = Relation::new("LINE");
        let row = ConstraintRow::new(
            "LINE",
            "FK_LINE",
            ConstraintKind::ForeignKey,
            "FK_LINE_IDX",
            "ORDER_ID",
        );

        let err = relation.load_constraint_field(&row).unwrap_err();
        assert!(matches!(err, Error::IncompleteForeignKey { constraint } if constraint == "FK_LINE"));
    }

    #[test]
    fn test_check_and_not_null_rows_ignored() {
        let mut relation = Relation::new("T");
        relation
            .load_constraint_field(&ConstraintRow::new(
                "T",
                "CHECK_1",
                ConstraintKind::Check,
                "",
                "X",
            ))
            .unwrap();
        relation
            .load_constraint_field(&ConstraintRow::new(
                "T",
                "NN_1",
                ConstraintKind::NotNull,
                "",
                "X",
            ))
            .unwrap();

        assert!(relation.primary_key().is_none());
        assert!(relation.foreign_keys().is_empty());
        assert!(relation.unique_constraints().is_empty());
    }
}
