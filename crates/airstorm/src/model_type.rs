use crate::{Cache, Field, Model};

use airstorm_core::{
    driver::Driver,
    schema::{ColumnId, Table, TableId},
    Error, RecordId, Result, Value,
};

use indexmap::IndexMap;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// The model synthesized for one table.
///
/// Holds one [`Field`] per column, keyed by attribute name, the table's record
/// [`Cache`], and the local edits staged on its instances.
pub struct ModelType {
    /// Same as the table id
    id: TableId,

    /// Singular type name, e.g. `Fruit` for the `Fruits` table
    name: String,

    /// Schema of the table
    table: Table,

    fields: IndexMap<String, Field>,

    /// Maps column ids to attribute names
    columns: HashMap<ColumnId, String>,

    cache: Cache,

    /// Local edits by record and column
    staged: Mutex<HashMap<(RecordId, ColumnId), Value>>,
}

impl ModelType {
    pub(crate) fn new(
        table: &Table,
        name: String,
        rename: &dyn Fn(&str) -> String,
        driver: Arc<dyn Driver>,
    ) -> ModelType {
        let mut fields: IndexMap<String, Field> = IndexMap::new();
        let mut columns = HashMap::new();

        for column in &table.columns {
            let field = Field::new(table.id.clone(), column.clone(), rename);

            if let Some(existing) = fields.get(field.attribute()) {
                log::warn!(
                    "column `{}` of {name} normalizes to attribute `{}`, already used by column `{}`; skipping",
                    column.name,
                    field.attribute(),
                    existing.name(),
                );
                continue;
            }

            columns.insert(column.id.clone(), field.attribute().to_string());
            fields.insert(field.attribute().to_string(), field);
        }

        ModelType {
            id: table.id.clone(),
            name,
            table: table.clone(),
            fields,
            columns,
            cache: Cache::new(table.id.clone(), driver),
            staged: Mutex::new(HashMap::new()),
        }
    }

    /// The table id
    pub fn id(&self) -> &TableId {
        &self.id
    }

    /// The type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name of the table
    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    /// Name of the column used to describe records
    pub fn primary_field(&self) -> &str {
        &self.table.primary_column_name
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn field(&self, attribute: &str) -> Option<&Field> {
        self.fields.get(attribute)
    }

    pub fn field_by_column_id(&self, id: &ColumnId) -> Option<&Field> {
        self.columns
            .get(id)
            .and_then(|attribute| self.fields.get(attribute))
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.values()
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn is_indexed(&self) -> bool {
        self.cache.is_indexed()
    }

    /// Returns the instance for `id`, fetching the record on a cache miss.
    ///
    /// An id the service does not know yields the unbound sentinel rather than
    /// an error.
    pub async fn get(&self, id: &str) -> Result<Model> {
        let record = self.cache.get(id).await?;

        if record.is_empty() {
            return Ok(self.empty());
        }

        Ok(Model::new(self.id.clone(), id.to_string()))
    }

    /// The unbound sentinel of this model type.
    pub fn empty(&self) -> Model {
        Model::unbound(self.id.clone())
    }

    pub(crate) fn field_or_err(&self, attribute: &str) -> Result<&Field> {
        self.field(attribute)
            .ok_or_else(|| Error::unknown_attribute(&self.name, attribute))
    }

    pub(crate) fn staged(&self, record: &str, column: &ColumnId) -> Option<Value> {
        self.lock_staged()
            .get(&(record.to_string(), column.clone()))
            .cloned()
    }

    pub(crate) fn stage(&self, record: &str, column: &ColumnId, value: Value) {
        self.lock_staged()
            .insert((record.to_string(), column.clone()), value);
    }

    pub(crate) fn unstage(&self, record: &str, column: &ColumnId) {
        self.lock_staged()
            .remove(&(record.to_string(), column.clone()));
    }

    fn lock_staged(&self) -> MutexGuard<'_, HashMap<(RecordId, ColumnId), Value>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ModelType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("ModelType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("cache", &self.cache)
            .finish()
    }
}
