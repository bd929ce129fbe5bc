//! The top-level schema aggregate and its load fold.

use std::collections::HashMap;

use indexmap::IndexMap;
use relcat_rows::{ConstraintKind, ConstraintRow, DomainRow, RelationFieldRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::field::Field;
use super::relation::Relation;
use crate::error::Error;

/// Options for [`DbSchema::load_with`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Check the documented row sort order before folding, failing with the
    /// offending row index instead of silently misgrouping. Off by default;
    /// the catalog queries already return rows in this order.
    pub verify_ordering: bool,
}

/// The reconstructed schema of one database.
///
/// Owns every domain and relation loaded from the catalog row sets, plus a
/// secondary index from unique/primary constraint names to their owning
/// relation for foreign-key target resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbSchema {
    fields: IndexMap<String, Field>,
    relations: IndexMap<String, Relation>,
    relation_by_uq: HashMap<String, String>,
}

impl DbSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            relations: IndexMap::new(),
            relation_by_uq: HashMap::new(),
        }
    }

    /// Fold the three catalog row sets into the schema graph.
    ///
    /// `relation_fields` must be sorted ascending by relation name, and
    /// `constraints` by relation name, then constraint name, then field
    /// position. The fold groups rows by scanning, not by looking up, so
    /// violating the order silently produces wrong groupings. See
    /// [`LoadOptions::verify_ordering`] for a checked variant via
    /// [`DbSchema::load_with`].
    ///
    /// Any previously loaded contents are replaced. Callers holding
    /// references into the old graph should construct a fresh `DbSchema`
    /// instead of reloading.
    pub fn load(
        &mut self,
        domains: &[DomainRow],
        relation_fields: &[RelationFieldRow],
        constraints: &[ConstraintRow],
    ) -> Result<(), Error> {
        self.load_with(domains, relation_fields, constraints, &LoadOptions::default())
    }

    /// [`DbSchema::load`] with explicit options.
    pub fn load_with(
        &mut self,
        domains: &[DomainRow],
        relation_fields: &[RelationFieldRow],
        constraints: &[ConstraintRow],
        options: &LoadOptions,
    ) -> Result<(), Error> {
        if options.verify_ordering {
            verify_relation_field_order(relation_fields)?;
            verify_constraint_order(constraints)?;
        }

        self.fields = IndexMap::new();
        self.relations = IndexMap::new();
        self.relation_by_uq = HashMap::new();

        debug!(rows = domains.len(), "loading domain definitions");
        for row in domains {
            self.fields.insert(row.name.clone(), Field::from(row));
        }

        debug!(rows = relation_fields.len(), "loading relation fields");
        // One linear scan over rows grouped by relation name; the current
        // relation is scan state, not a per-row map lookup.
        let mut current: Option<Relation> = None;
        for row in relation_fields {
            match current.as_mut() {
                Some(relation) if relation.name() == row.relation_name => {
                    relation.load_field(row);
                }
                _ => {
                    if let Some(done) = current.take() {
                        self.relations.insert(done.name().to_owned(), done);
                    }
                    let mut relation = Relation::new(row.relation_name.clone());
                    relation.load_field(row);
                    current = Some(relation);
                }
            }
        }
        if let Some(done) = current.take() {
            self.relations.insert(done.name().to_owned(), done);
        }

        debug!(rows = constraints.len(), "loading constraints");
        for row in constraints {
            let relation =
                self.relations
                    .get_mut(&row.relation_name)
                    .ok_or_else(|| Error::UnknownRelation {
                        relation: row.relation_name.clone(),
                        constraint: row.constraint_name.clone(),
                    })?;
            relation.load_constraint_field(row)?;

            // Foreign keys resolve their target through this index, so only
            // unique-like constraints register here.
            if matches!(
                row.kind,
                ConstraintKind::PrimaryKey | ConstraintKind::Unique
            ) {
                self.relation_by_uq
                    .insert(row.constraint_name.clone(), row.relation_name.clone());
            }
        }

        info!(
            fields = self.fields.len(),
            relations = self.relations.len(),
            "schema load complete"
        );
        Ok(())
    }

    /// Domain definitions keyed by name.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Look up one domain by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Relations keyed by name, in load order.
    pub fn relations(&self) -> &IndexMap<String, Relation> {
        &self.relations
    }

    /// Look up one relation by name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// Visit every relation in load order, optionally skipping relations
    /// without a primary key.
    pub fn for_each_relation<F>(&self, mut visitor: F, only_with_primary_key: bool)
    where
        F: FnMut(&Relation),
    {
        for relation in self.relations.values() {
            if only_with_primary_key && !relation.has_primary_key() {
                continue;
            }
            visitor(relation);
        }
    }

    /// First relation satisfying `predicate`, in load order.
    pub fn find_relation<P>(&self, mut predicate: P) -> Option<&Relation>
    where
        P: FnMut(&Relation) -> bool,
    {
        self.relations.values().find(|relation| predicate(relation))
    }

    /// Relation owning the unique or primary-key constraint `name`.
    ///
    /// Foreign-key targets resolve through this; an unknown name means the
    /// catalog data is corrupt and fails loudly rather than returning
    /// nothing.
    pub fn relation_by_uq_constraint(&self, name: &str) -> Result<&Relation, Error> {
        self.relation_by_uq
            .get(name)
            .and_then(|relation| self.relations.get(relation))
            .ok_or_else(|| Error::UnknownUniqueConstraint(name.to_owned()))
    }
}

impl Default for DbSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_relation_field_order(rows: &[RelationFieldRow]) -> Result<(), Error> {
    for (index, pair) in rows.windows(2).enumerate() {
        if pair[1].relation_name < pair[0].relation_name {
            return Err(Error::UnsortedRelationFields {
                index: index + 1,
                relation: pair[1].relation_name.clone(),
            });
        }
    }
    Ok(())
}

fn verify_constraint_order(rows: &[ConstraintRow]) -> Result<(), Error> {
    for (index, pair) in rows.windows(2).enumerate() {
        let earlier = (&pair[0].relation_name, &pair[0].constraint_name);
        let later = (&pair[1].relation_name, &pair[1].constraint_name);
        if later < earlier {
            return Err(Error::UnsortedConstraints {
                index: index + 1,
                relation: pair[1].relation_name.clone(),
                constraint: pair[1].constraint_name.clone(),
            });
        }
    }
    Ok(())
}
