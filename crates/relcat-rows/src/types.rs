//! Value vocabulary shared by catalog rows and the schema model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// SQL data type of a domain, identified by its numeric catalog code.
///
/// The code space follows the Firebird-style system catalog. Codes the
/// vocabulary does not know are preserved as [`SqlType::Other`] so that a
/// schema loaded from a newer server version stays lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    /// 16-bit signed integer (code 7).
    SmallInt,
    /// 32-bit signed integer (code 8).
    Integer,
    /// 32-bit floating point (code 10).
    Float,
    /// Calendar date (code 12).
    Date,
    /// Time of day (code 13).
    Time,
    /// Fixed-length character string (code 14).
    Char,
    /// 64-bit signed integer (code 16).
    BigInt,
    /// Boolean value (code 23).
    Boolean,
    /// 64-bit floating point (code 27).
    Double,
    /// Date and time of day (code 35).
    Timestamp,
    /// Variable-length character string (code 37).
    VarChar,
    /// Zero-terminated character string (code 40).
    CString,
    /// Binary large object (code 261).
    Blob,
    /// Any other catalog type code, carried verbatim.
    Other(i16),
}

impl SqlType {
    /// Map a raw catalog type code to its vocabulary entry.
    pub fn from_code(code: i16) -> Self {
        match code {
            7 => SqlType::SmallInt,
            8 => SqlType::Integer,
            10 => SqlType::Float,
            12 => SqlType::Date,
            13 => SqlType::Time,
            14 => SqlType::Char,
            16 => SqlType::BigInt,
            23 => SqlType::Boolean,
            27 => SqlType::Double,
            35 => SqlType::Timestamp,
            37 => SqlType::VarChar,
            40 => SqlType::CString,
            261 => SqlType::Blob,
            other => SqlType::Other(other),
        }
    }

    /// The numeric catalog code for this type.
    pub fn code(&self) -> i16 {
        match self {
            SqlType::SmallInt => 7,
            SqlType::Integer => 8,
            SqlType::Float => 10,
            SqlType::Date => 12,
            SqlType::Time => 13,
            SqlType::Char => 14,
            SqlType::BigInt => 16,
            SqlType::Boolean => 23,
            SqlType::Double => 27,
            SqlType::Timestamp => 35,
            SqlType::VarChar => 37,
            SqlType::CString => 40,
            SqlType::Blob => 261,
            SqlType::Other(code) => *code,
        }
    }

    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::SmallInt
                | SqlType::Integer
                | SqlType::BigInt
                | SqlType::Float
                | SqlType::Double
        )
    }

    /// Check if this type is character data.
    pub fn is_character(&self) -> bool {
        matches!(self, SqlType::Char | SqlType::VarChar | SqlType::CString)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::Float => "FLOAT",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Char => "CHAR",
            SqlType::BigInt => "BIGINT",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Double => "DOUBLE PRECISION",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::VarChar => "VARCHAR",
            SqlType::CString => "CSTRING",
            SqlType::Blob => "BLOB",
            SqlType::Other(code) => return write!(f, "TYPE {code}"),
        };
        f.write_str(name)
    }
}

/// Referential action of a foreign key on update or delete of the
/// referenced row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefRule {
    /// Propagate the change to referencing rows.
    Cascade,
    /// Reject the change while referencing rows exist.
    Restrict,
    /// Set the referencing columns to NULL.
    SetNull,
    /// Reject the change at statement end (the catalog default).
    NoAction,
    /// Set the referencing columns to their declared default.
    SetDefault,
}

impl RefRule {
    /// The catalog spelling of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefRule::Cascade => "CASCADE",
            RefRule::Restrict => "RESTRICT",
            RefRule::SetNull => "SET NULL",
            RefRule::NoAction => "NO ACTION",
            RefRule::SetDefault => "SET DEFAULT",
        }
    }
}

impl FromStr for RefRule {
    type Err = Error;

    /// Parse the catalog spelling. CHAR catalog columns arrive padded with
    /// trailing blanks, so padding is tolerated.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim_end() {
            "CASCADE" => Ok(RefRule::Cascade),
            "RESTRICT" => Ok(RefRule::Restrict),
            "SET NULL" => Ok(RefRule::SetNull),
            "NO ACTION" => Ok(RefRule::NoAction),
            "SET DEFAULT" => Ok(RefRule::SetDefault),
            other => Err(Error::UnknownRule(other.to_owned())),
        }
    }
}

impl fmt::Display for RefRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a relation constraint as spelled in the catalog.
///
/// The schema load folds only key kinds; [`ConstraintKind::Check`] and
/// [`ConstraintKind::NotNull`] rows are accepted and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// PRIMARY KEY constraint.
    PrimaryKey,
    /// FOREIGN KEY constraint.
    ForeignKey,
    /// UNIQUE constraint.
    Unique,
    /// CHECK constraint.
    Check,
    /// NOT NULL constraint.
    NotNull,
}

impl ConstraintKind {
    /// The catalog spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "PRIMARY KEY",
            ConstraintKind::ForeignKey => "FOREIGN KEY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Check => "CHECK",
            ConstraintKind::NotNull => "NOT NULL",
        }
    }
}

impl FromStr for ConstraintKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim_end() {
            "PRIMARY KEY" => Ok(ConstraintKind::PrimaryKey),
            "FOREIGN KEY" => Ok(ConstraintKind::ForeignKey),
            "UNIQUE" => Ok(ConstraintKind::Unique),
            "CHECK" => Ok(ConstraintKind::Check),
            "NOT NULL" => Ok(ConstraintKind::NotNull),
            other => Err(Error::UnknownConstraintKind(other.to_owned())),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
