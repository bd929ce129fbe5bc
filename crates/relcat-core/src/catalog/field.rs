//! Domain definitions.

use relcat_rows::{DomainRow, SqlType};
use serde::{Deserialize, Serialize};

/// A domain: a named, reusable column type definition.
///
/// Immutable once built; the schema keys domains by name, so the name lives
/// in the owning map rather than here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
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

impl From<&DomainRow> for Field {
    fn from(row: &DomainRow) -> Self {
        Self {
            field_type: row.field_type,
            not_null: row.not_null,
            default_source: row.default_source.clone(),
            length: row.length,
            scale: row.scale,
            validation_source: row.validation_source.clone(),
            sub_type: row.sub_type,
            precision: row.precision,
        }
    }
}
