//! Schema of a remote base: its tables and their columns.

mod column;
pub use column::{
    Column, ColumnId, ColumnType, ForeignKey, NumberFormat, Relationship, TypeOptions,
};

mod name;
pub use name::{to_identifier, to_plural_identifier, to_type_name, Name};

mod table;
pub use table::{Table, TableId};

mod verify;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Remote base id
    #[serde(default)]
    pub id: String,

    /// Display name of the base
    #[serde(default)]
    pub name: String,

    pub tables: Vec<Table>,
}

impl Schema {
    /// Parses and verifies a JSON schema document.
    pub fn from_json(src: &str) -> Result<Schema> {
        let schema: Schema = serde_json::from_str(src)?;
        schema.verify()?;
        Ok(schema)
    }

    /// Reads a JSON schema document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Schema> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|err| {
            crate::Error::from(err).context(crate::err!("reading schema {}", path.display()))
        })?;
        Schema::from_json(&src)
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|table| &table.id == id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}
