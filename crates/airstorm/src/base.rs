mod builder;
pub use builder::Builder;

use crate::{ModelListType, ModelType};

use airstorm_core::{
    schema::{Schema, TableId},
    Error, Result,
};
use indexmap::IndexMap;
use std::sync::Arc;

/// Shared state between all `Base` clones.
struct Shared {
    /// Remote base id
    id: String,

    api_key: Option<String>,

    schema: Schema,

    /// Model types by table id, in schema order
    model_types: IndexMap<TableId, ModelType>,

    /// Model list types by table id, in schema order
    model_list_types: IndexMap<TableId, ModelListType>,

    /// Type names to table ids
    names: IndexMap<String, TableId>,
}

/// A remote base and the model types synthesized from its schema.
///
/// Registries are built once by [`Builder::build`] and are read-only
/// afterwards. Cloning a `Base` is cheap; clones share the registries and
/// the record caches.
#[derive(Clone)]
pub struct Base {
    shared: Arc<Shared>,
}

impl Base {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The remote base id
    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn api_key(&self) -> Option<&str> {
        self.shared.api_key.as_deref()
    }

    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    /// Looks a model type up by type name (`Fruit`), table name (`Fruits`) or
    /// table id.
    pub fn model_type(&self, name: &str) -> Result<&ModelType> {
        let id = self.resolve(name)?;
        self.model_type_by_id(&id)
    }

    pub fn model_type_by_id(&self, id: &TableId) -> Result<&ModelType> {
        self.shared
            .model_types
            .get(id)
            .ok_or_else(|| self.unknown(id.as_str()))
    }

    /// Looks a model list type up by its name (`FruitList`), or by anything
    /// [`Base::model_type`] accepts.
    pub fn model_list_type(&self, name: &str) -> Result<&ModelListType> {
        if let Some(list_type) = self
            .shared
            .model_list_types
            .values()
            .find(|list_type| list_type.name() == name)
        {
            return Ok(list_type);
        }

        let id = self.resolve(name)?;
        self.model_list_type_by_id(&id)
    }

    pub fn model_list_type_by_id(&self, id: &TableId) -> Result<&ModelListType> {
        self.shared
            .model_list_types
            .get(id)
            .ok_or_else(|| self.unknown(id.as_str()))
    }

    /// All model types, in schema order
    pub fn model_types(&self) -> impl ExactSizeIterator<Item = &ModelType> {
        self.shared.model_types.values()
    }

    pub fn model_list_types(&self) -> impl ExactSizeIterator<Item = &ModelListType> {
        self.shared.model_list_types.values()
    }

    fn resolve(&self, name: &str) -> Result<TableId> {
        resolve(&self.shared.schema, &self.shared.names, name).ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> Error {
        Error::unknown_attribute(format!("base {}", self.shared.id), name)
    }
}

/// Finds the table a type name, table name or table id refers to.
fn resolve(schema: &Schema, names: &IndexMap<String, TableId>, name: &str) -> Option<TableId> {
    if let Some(id) = names.get(name) {
        return Some(id.clone());
    }

    if let Some(table) = schema.table_by_name(name) {
        return Some(table.id.clone());
    }

    schema
        .tables()
        .find(|table| table.id == name)
        .map(|table| table.id.clone())
}

impl std::fmt::Debug for Base {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Base")
            .field("id", &self.shared.id)
            .field("model_types", &self.shared.names.keys().collect::<Vec<_>>())
            .finish()
    }
}
