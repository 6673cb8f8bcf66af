use super::TableId;
use crate::Value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote column identifier, e.g. `fld5tR1r0jBCqjG06`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Uniquely identifies the column within the base
    pub id: ColumnId,

    /// Display name; also the key of the column in record fields
    pub name: String,

    #[serde(rename = "type")]
    pub ty: ColumnType,

    #[serde(default)]
    pub type_options: Option<TypeOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Text,
    Number,
    SingleSelect,
    MultiSelect,
    ForeignKey,
    Formula,
    Computation,
    /// Any column type Airstorm has no special handling for (`checkbox`,
    /// `date`, `multipleAttachment`, ...)
    Other(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    /// Number columns: integer or decimal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<NumberFormat>,

    /// Foreign key columns: the linked table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_table_id: Option<TableId>,

    /// Foreign key columns: link cardinality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,

    /// Foreign key columns: the column on the linked table pointing back here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric_column_id: Option<ColumnId>,

    /// Options Airstorm does not interpret (select choices, precision, ...)
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NumberFormat {
    Integer,
    Decimal,
    Other(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    One,
    Many,
}

/// Resolved foreign key options of a column.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKey<'a> {
    pub foreign_table_id: &'a TableId,
    pub relationship: Relationship,
    pub symmetric_column_id: Option<&'a ColumnId>,
}

impl Column {
    pub fn type_options(&self) -> Option<&TypeOptions> {
        self.type_options.as_ref()
    }

    /// Formula and computation columns are derived by the service and cannot
    /// be edited.
    pub fn is_read_only(&self) -> bool {
        matches!(self.ty, ColumnType::Formula | ColumnType::Computation)
    }

    pub fn is_foreign_key(&self) -> bool {
        self.ty == ColumnType::ForeignKey
    }

    /// Returns the foreign key options, or `None` if this is not a foreign key
    /// column or it does not name its linked table.
    ///
    /// A missing relationship is read as `many`, which is how the service
    /// exposes links by default.
    pub fn foreign_key(&self) -> Option<ForeignKey<'_>> {
        if !self.is_foreign_key() {
            return None;
        }

        let options = self.type_options()?;

        Some(ForeignKey {
            foreign_table_id: options.foreign_table_id.as_ref()?,
            relationship: options.relationship.unwrap_or(Relationship::Many),
            symmetric_column_id: options.symmetric_column_id.as_ref(),
        })
    }

    /// The value read for this column when a record has no cell for it.
    pub fn default_value(&self) -> Value {
        match &self.ty {
            ColumnType::Number => {
                let format = self.type_options().and_then(|options| options.format.as_ref());
                match format {
                    Some(NumberFormat::Integer) => Value::I64(0),
                    _ => Value::F64(0.0),
                }
            }
            ColumnType::Text | ColumnType::SingleSelect => Value::String(String::new()),
            ColumnType::MultiSelect => Value::List(vec![]),
            _ => Value::Null,
        }
    }

    /// Documentation for the column: its description, or a generic line.
    pub fn doc(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => description.clone(),
            _ => format!("{} field.", self.name),
        }
    }
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::SingleSelect => "singleSelect",
            ColumnType::MultiSelect => "multiSelect",
            ColumnType::ForeignKey => "foreignKey",
            ColumnType::Formula => "formula",
            ColumnType::Computation => "computation",
            ColumnType::Other(other) => other,
        }
    }
}

impl From<String> for ColumnType {
    fn from(src: String) -> ColumnType {
        match &src[..] {
            "text" => ColumnType::Text,
            "number" => ColumnType::Number,
            "singleSelect" | "select" => ColumnType::SingleSelect,
            "multiSelect" => ColumnType::MultiSelect,
            "foreignKey" => ColumnType::ForeignKey,
            "formula" => ColumnType::Formula,
            "computation" => ColumnType::Computation,
            _ => ColumnType::Other(src),
        }
    }
}

impl From<ColumnType> for String {
    fn from(src: ColumnType) -> String {
        match src {
            ColumnType::Other(other) => other,
            ty => ty.as_str().to_string(),
        }
    }
}

impl From<String> for NumberFormat {
    fn from(src: String) -> NumberFormat {
        match &src[..] {
            "integer" => NumberFormat::Integer,
            "decimal" => NumberFormat::Decimal,
            _ => NumberFormat::Other(src),
        }
    }
}

impl From<NumberFormat> for String {
    fn from(src: NumberFormat) -> String {
        match src {
            NumberFormat::Integer => "integer".to_string(),
            NumberFormat::Decimal => "decimal".to_string(),
            NumberFormat::Other(other) => other,
        }
    }
}

impl ColumnId {
    pub fn new(id: impl Into<String>) -> ColumnId {
        ColumnId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(src: &str) -> ColumnId {
        ColumnId::new(src)
    }
}

impl PartialEq<str> for ColumnId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ColumnId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({})", self.0)
    }
}
