use super::{Column, ColumnId};

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// Remote table identifier, e.g. `tblCko8U7PjPYPNpf`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Uniquely identifies the table within the base
    pub id: TableId,

    /// Display name, e.g. `Fruits`
    pub name: String,

    #[serde(default)]
    pub is_empty: bool,

    #[serde(default)]
    pub name_for_url: Option<String>,

    /// Name of the column used to display a record
    pub primary_column_name: String,

    #[serde(alias = "fields")]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_column(&self) -> Option<&Column> {
        self.column_by_name(&self.primary_column_name)
    }
}

impl TableId {
    pub fn new(id: impl Into<String>) -> TableId {
        TableId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableId {
    fn from(src: &str) -> TableId {
        TableId::new(src)
    }
}

impl From<String> for TableId {
    fn from(src: String) -> TableId {
        TableId(src)
    }
}

impl From<&TableId> for TableId {
    fn from(src: &TableId) -> TableId {
        src.clone()
    }
}

impl Borrow<str> for TableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TableId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TableId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
