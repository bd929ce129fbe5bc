//! Schema snapshot diffing.
//!
//! Compares two loaded schemas and produces a structured list of changes.
//! Metadata-refresh flows use this to decide what downstream state (caches,
//! generated bindings) a new snapshot invalidates.

use indexmap::IndexMap;

use crate::catalog::{DbSchema, Field, Relation, RelationField};

/// Complete diff between two schema snapshots.
#[derive(Debug, Clone)]
pub struct SchemaDiff {
    /// Changes to domains.
    pub domain_changes: Vec<DomainChange>,
    /// Changes to relations.
    pub relation_changes: Vec<RelationChange>,
}

impl SchemaDiff {
    /// Compute the diff between two schema snapshots.
    pub fn compute(from: &DbSchema, to: &DbSchema) -> Self {
        SchemaDiff {
            domain_changes: diff_domains(from, to),
            relation_changes: diff_relations(from, to),
        }
    }

    /// Check if there are any changes.
    pub fn is_empty(&self) -> bool {
        self.domain_changes.is_empty() && self.relation_changes.is_empty()
    }

    /// Get the total number of changes.
    pub fn change_count(&self) -> usize {
        self.domain_changes.len() + self.relation_changes.len()
    }
}

fn diff_domains(from: &DbSchema, to: &DbSchema) -> Vec<DomainChange> {
    let mut changes = Vec::new();

    for (name, field) in to.fields() {
        match from.field(name) {
            None => changes.push(DomainChange::Added {
                name: name.clone(),
                field: field.clone(),
            }),
            Some(old) if old != field => changes.push(DomainChange::Modified {
                name: name.clone(),
                from: old.clone(),
                to: field.clone(),
            }),
            Some(_) => {}
        }
    }

    for name in from.fields().keys() {
        if to.field(name).is_none() {
            changes.push(DomainChange::Removed { name: name.clone() });
        }
    }

    changes
}

fn diff_relations(from: &DbSchema, to: &DbSchema) -> Vec<RelationChange> {
    let mut changes = Vec::new();

    for (name, relation) in to.relations() {
        match from.relation(name) {
            None => changes.push(RelationChange::Added(name.clone())),
            Some(old) => {
                if let Some(change) = diff_relation(old, relation) {
                    changes.push(change);
                }
            }
        }
    }

    for name in from.relations().keys() {
        if to.relation(name).is_none() {
            changes.push(RelationChange::Removed(name.clone()));
        }
    }

    changes
}

fn diff_relation(from: &Relation, to: &Relation) -> Option<RelationChange> {
    let field_changes = diff_fields(from.fields(), to.fields());
    let primary_key_changed = from.primary_key() != to.primary_key();
    let foreign_key_changes = diff_constraints(from.foreign_keys(), to.foreign_keys());
    let unique_changes = diff_constraints(from.unique_constraints(), to.unique_constraints());

    if field_changes.is_empty()
        && !primary_key_changed
        && foreign_key_changes.is_empty()
        && unique_changes.is_empty()
    {
        return None;
    }

    Some(RelationChange::Modified {
        relation_name: to.name().to_owned(),
        field_changes,
        primary_key_changed,
        foreign_key_changes,
        unique_changes,
    })
}

fn diff_fields(
    from: &IndexMap<String, RelationField>,
    to: &IndexMap<String, RelationField>,
) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for (name, field) in to {
        let old = match from.get(name) {
            None => {
                changes.push(FieldChange::Added(field.clone()));
                continue;
            }
            Some(old) => old,
        };

        if old.field_source != field.field_source {
            changes.push(FieldChange::SourceChanged {
                field_name: name.clone(),
                from: old.field_source.clone(),
                to: field.field_source.clone(),
            });
        }
        if old.not_null != field.not_null {
            changes.push(FieldChange::NullabilityChanged {
                field_name: name.clone(),
                from: old.not_null,
                to: field.not_null,
            });
        }
        if old.default_source != field.default_source {
            changes.push(FieldChange::DefaultChanged {
                field_name: name.clone(),
                from: old.default_source.clone(),
                to: field.default_source.clone(),
            });
        }
    }

    for name in from.keys() {
        if !to.contains_key(name) {
            changes.push(FieldChange::Removed { name: name.clone() });
        }
    }

    changes
}

fn diff_constraints<V: PartialEq>(
    from: &IndexMap<String, V>,
    to: &IndexMap<String, V>,
) -> Vec<ConstraintChange> {
    let mut changes = Vec::new();

    for (name, constraint) in to {
        match from.get(name) {
            None => changes.push(ConstraintChange::Added(name.clone())),
            Some(old) if old != constraint => {
                changes.push(ConstraintChange::Modified(name.clone()))
            }
            Some(_) => {}
        }
    }

    for name in from.keys() {
        if !to.contains_key(name) {
            changes.push(ConstraintChange::Removed(name.clone()));
        }
    }

    changes
}

/// Change to a domain definition.
#[derive(Debug, Clone)]
pub enum DomainChange {
    /// Domain was added.
    Added {
        /// Domain name.
        name: String,
        /// The new definition.
        field: Field,
    },
    /// Domain was removed.
    Removed {
        /// Domain name.
        name: String,
    },
    /// Domain definition changed.
    Modified {
        /// Domain name.
        name: String,
        /// Original definition.
        from: Field,
        /// New definition.
        to: Field,
    },
}

impl DomainChange {
    /// Get the domain name for this change.
    pub fn name(&self) -> &str {
        match self {
            DomainChange::Added { name, .. } => name,
            DomainChange::Removed { name } => name,
            DomainChange::Modified { name, .. } => name,
        }
    }
}

/// Change to a relation.
#[derive(Debug, Clone)]
pub enum RelationChange {
    /// Relation was added.
    Added(String),
    /// Relation was removed.
    Removed(String),
    /// Relation was modified.
    Modified {
        /// Name of the relation.
        relation_name: String,
        /// Changes to columns.
        field_changes: Vec<FieldChange>,
        /// Whether the primary key changed.
        primary_key_changed: bool,
        /// Changes to foreign keys.
        foreign_key_changes: Vec<ConstraintChange>,
        /// Changes to unique constraints.
        unique_changes: Vec<ConstraintChange>,
    },
}

impl RelationChange {
    /// Get the relation name for this change.
    pub fn relation_name(&self) -> &str {
        match self {
            RelationChange::Added(name) => name,
            RelationChange::Removed(name) => name,
            RelationChange::Modified { relation_name, .. } => relation_name,
        }
    }
}

/// Change to a column within a relation.
#[derive(Debug, Clone)]
pub enum FieldChange {
    /// Column was added.
    Added(RelationField),
    /// Column was removed.
    Removed {
        /// Column name.
        name: String,
    },
    /// Column was rebound to a different domain.
    SourceChanged {
        /// Column name.
        field_name: String,
        /// Original domain name.
        from: String,
        /// New domain name.
        to: String,
    },
    /// Column nullability changed.
    NullabilityChanged {
        /// Column name.
        field_name: String,
        /// Was NOT NULL before.
        from: bool,
        /// Is NOT NULL now.
        to: bool,
    },
    /// Column default changed.
    DefaultChanged {
        /// Column name.
        field_name: String,
        /// Original DEFAULT text.
        from: Option<String>,
        /// New DEFAULT text.
        to: Option<String>,
    },
}

impl FieldChange {
    /// Get the column name for this change.
    pub fn field_name(&self) -> &str {
        match self {
            FieldChange::Added(field) => &field.name,
            FieldChange::Removed { name } => name,
            FieldChange::SourceChanged { field_name, .. } => field_name,
            FieldChange::NullabilityChanged { field_name, .. } => field_name,
            FieldChange::DefaultChanged { field_name, .. } => field_name,
        }
    }
}

/// Change to a named constraint.
#[derive(Debug, Clone)]
pub enum ConstraintChange {
    /// Constraint was added.
    Added(String),
    /// Constraint was removed.
    Removed(String),
    /// Constraint was modified.
    Modified(String),
}

impl ConstraintChange {
    /// Get the constraint name for this change.
    pub fn constraint_name(&self) -> &str {
        match self {
            ConstraintChange::Added(name) => name,
            ConstraintChange::Removed(name) => name,
            ConstraintChange::Modified(name) => name,
        }
    }
}
