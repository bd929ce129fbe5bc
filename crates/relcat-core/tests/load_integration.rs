//! Integration tests for the schema load fold.

use relcat_core::rows::{ConstraintRow, DomainRow, RefRule, RelationFieldRow, SqlType};
use relcat_core::{DbSchema, RelationChange, SchemaDiff};

fn sales_domains() -> Vec<DomainRow> {
    vec![
        DomainRow::new("D_ID", SqlType::Integer, 4).not_null(),
        DomainRow::new("D_NAME", SqlType::VarChar, 60).not_null(),
        DomainRow::new("D_EMAIL", SqlType::VarChar, 120),
        DomainRow::new("D_QTY", SqlType::SmallInt, 2).with_default("1"),
        DomainRow::new("D_PRICE", SqlType::BigInt, 8)
            .with_scale(-2)
            .with_precision(18),
        DomainRow::new("D_STAMP", SqlType::Timestamp, 8).with_default("CURRENT_TIMESTAMP"),
    ]
}

fn sales_relation_fields() -> Vec<RelationFieldRow> {
    vec![
        // sorted ascending by relation name, as the catalog query returns them
        RelationFieldRow::new("CUSTOMER", "ID", "D_ID").not_null(),
        RelationFieldRow::new("CUSTOMER", "NAME", "D_NAME").not_null(),
        RelationFieldRow::new("CUSTOMER", "EMAIL", "D_EMAIL"),
        RelationFieldRow::new("ORDERS", "ID", "D_ID").not_null(),
        RelationFieldRow::new("ORDERS", "CUSTOMER_ID", "D_ID").not_null(),
        RelationFieldRow::new("ORDERS", "CREATED_AT", "D_STAMP"),
        RelationFieldRow::new("ORDER_LINE", "ORDER_ID", "D_ID").not_null(),
        RelationFieldRow::new("ORDER_LINE", "LINE_NO", "D_QTY").not_null(),
        RelationFieldRow::new("ORDER_LINE", "QTY", "D_QTY"),
        RelationFieldRow::new("ORDER_LINE", "PRICE", "D_PRICE"),
    ]
}

fn sales_constraints() -> Vec<ConstraintRow> {
    vec![
        // sorted by relation name, constraint name, field position
        ConstraintRow::primary_key("CUSTOMER", "PK_CUSTOMER", "PK_CUSTOMER_IDX", "ID"),
        ConstraintRow::unique("CUSTOMER", "UQ_CUSTOMER_EMAIL", "UQ_CUSTOMER_EMAIL_IDX", "EMAIL"),
        ConstraintRow::foreign_key(
            "ORDERS",
            "FK_ORDERS_CUSTOMER",
            "FK_ORDERS_CUSTOMER_IDX",
            "CUSTOMER_ID",
            "PK_CUSTOMER",
            RefRule::NoAction,
            RefRule::Restrict,
        ),
        ConstraintRow::primary_key("ORDERS", "PK_ORDERS", "PK_ORDERS_IDX", "ID"),
        ConstraintRow::foreign_key(
            "ORDER_LINE",
            "FK_LINE_ORDER",
            "FK_LINE_ORDER_IDX",
            "ORDER_ID",
            "PK_ORDERS",
            RefRule::Cascade,
            RefRule::Cascade,
        ),
        ConstraintRow::primary_key("ORDER_LINE", "PK_ORDER_LINE", "PK_ORDER_LINE_IDX", "ORDER_ID"),
        ConstraintRow::primary_key("ORDER_LINE", "PK_ORDER_LINE", "PK_ORDER_LINE_IDX", "LINE_NO"),
    ]
}

fn load_sales_schema() -> DbSchema {
    let mut schema = DbSchema::new();
    schema
        .load(
            &sales_domains(),
            &sales_relation_fields(),
            &sales_constraints(),
        )
        .unwrap();
    schema
}

#[test]
fn test_full_catalog_load() {
    let schema = load_sales_schema();

    assert_eq!(schema.fields().len(), 6);
    assert_eq!(schema.relations().len(), 3);

    let order: Vec<_> = schema.relations().keys().cloned().collect();
    assert_eq!(order, ["CUSTOMER", "ORDERS", "ORDER_LINE"]);

    let customer = schema.relation("CUSTOMER").unwrap();
    assert_eq!(customer.fields().len(), 3);
    assert_eq!(customer.primary_key().unwrap().fields(), ["ID"]);
    assert_eq!(
        customer.unique_constraints()["UQ_CUSTOMER_EMAIL"].fields(),
        ["EMAIL"]
    );

    let line = schema.relation("ORDER_LINE").unwrap();
    assert_eq!(line.primary_key().unwrap().fields(), ["ORDER_ID", "LINE_NO"]);
    assert_eq!(line.field("PRICE").unwrap().field_source, "D_PRICE");
}

#[test]
fn test_foreign_key_target_resolution() {
    let schema = load_sales_schema();

    // walk ORDER_LINE -> ORDERS -> CUSTOMER through the uq index
    let line_fk = &schema.relation("ORDER_LINE").unwrap().foreign_keys()["FK_LINE_ORDER"];
    let orders = schema
        .relation_by_uq_constraint(line_fk.references_constraint())
        .unwrap();
    assert_eq!(orders.name(), "ORDERS");

    let orders_fk = &orders.foreign_keys()["FK_ORDERS_CUSTOMER"];
    let customer = schema
        .relation_by_uq_constraint(orders_fk.references_constraint())
        .unwrap();
    assert_eq!(customer.name(), "CUSTOMER");
    assert_eq!(orders_fk.delete_rule(), RefRule::Restrict);
}

#[test]
fn test_relations_with_primary_keys_only() {
    let mut relation_fields = sales_relation_fields();
    relation_fields.push(RelationFieldRow::new("SCRATCH", "NOTE", "D_NAME"));

    let mut schema = DbSchema::new();
    schema
        .load(&sales_domains(), &relation_fields, &sales_constraints())
        .unwrap();

    let mut keyed = Vec::new();
    schema.for_each_relation(|relation| keyed.push(relation.name().to_owned()), true);
    assert_eq!(keyed, ["CUSTOMER", "ORDERS", "ORDER_LINE"]);

    let scratch = schema.find_relation(|relation| !relation.has_primary_key());
    assert_eq!(scratch.map(|relation| relation.name()), Some("SCRATCH"));
}

#[test]
fn test_snapshot_serialization_roundtrip() {
    let schema = load_sales_schema();

    let json = serde_json::to_string(&schema).unwrap();
    let decoded: DbSchema = serde_json::from_str(&json).unwrap();

    assert_eq!(schema, decoded);

    // the decoded snapshot answers lookups the same way
    let target = decoded.relation_by_uq_constraint("PK_ORDERS").unwrap();
    assert_eq!(target.name(), "ORDERS");
}

#[test]
fn test_refresh_diff_reports_new_relation() {
    let before = load_sales_schema();

    let mut relation_fields = sales_relation_fields();
    relation_fields.insert(
        0,
        RelationFieldRow::new("ADDRESS", "CUSTOMER_ID", "D_ID").not_null(),
    );
    let mut constraints = sales_constraints();
    constraints.insert(
        0,
        ConstraintRow::foreign_key(
            "ADDRESS",
            "FK_ADDRESS_CUSTOMER",
            "FK_ADDRESS_CUSTOMER_IDX",
            "CUSTOMER_ID",
            "PK_CUSTOMER",
            RefRule::NoAction,
            RefRule::Cascade,
        ),
    );

    let mut after = DbSchema::new();
    after
        .load(&sales_domains(), &relation_fields, &constraints)
        .unwrap();

    let diff = SchemaDiff::compute(&before, &after);
    assert_eq!(diff.change_count(), 1);
    assert!(matches!(
        diff.relation_changes.as_slice(),
        [RelationChange::Added(name)] if name == "ADDRESS"
    ));
}
