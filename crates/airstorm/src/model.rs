use crate::{Base, FieldValue, ModelType};

use airstorm_core::{schema::TableId, Error, RawRecord, RecordId, Result, Value};

/// A record of one table.
///
/// A model is only its identity: the table id and the record id. Field values
/// live in the table's [`Cache`](crate::Cache) and are read through the
/// [`Base`] that owns the model type. An empty record id is the *unbound*
/// sentinel: it exists for every model type, reads default values, and is
/// what a lookup of an unknown record id downgrades to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    table: TableId,
    id: RecordId,
}

impl Model {
    pub(crate) fn new(table: TableId, id: RecordId) -> Model {
        Model { table, id }
    }

    pub(crate) fn unbound(table: TableId) -> Model {
        Model::new(table, RecordId::new())
    }

    /// Id of the table this record belongs to
    pub fn table_id(&self) -> &TableId {
        &self.table
    }

    /// Record id; empty for the unbound sentinel
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` if this instance stands for a record of the service.
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn model_type<'a>(&self, base: &'a Base) -> Result<&'a ModelType> {
        base.model_type_by_id(&self.table)
    }

    /// Reads a field by attribute name, e.g. `"name"` for the `Name` column.
    pub async fn get(&self, base: &Base, attribute: &str) -> Result<FieldValue> {
        let model_type = self.model_type(base)?;
        model_type.field_or_err(attribute)?.read(base, self).await
    }

    /// The raw record backing this instance.
    pub async fn record(&self, base: &Base) -> Result<RawRecord> {
        self.model_type(base)?.cache().get(&self.id).await
    }

    /// Stages a local edit. Reads of this instance return the staged value
    /// until it is discarded; other instances are not affected.
    pub fn set(&self, base: &Base, attribute: &str, value: impl Into<Value>) -> Result<()> {
        let model_type = self.model_type(base)?;
        model_type.field_or_err(attribute)?.write(base, self, value.into())
    }

    /// Drops the staged edit of a field, if any.
    pub fn discard(&self, base: &Base, attribute: &str) -> Result<()> {
        let model_type = self.model_type(base)?;
        model_type.field_or_err(attribute)?.discard(base, self)
    }

    /// Display text of the record: the cached value of the table's primary
    /// column, or the record id when the cache holds no such cell. The unbound
    /// sentinel describes as an empty string.
    pub fn describe(&self, base: &Base) -> String {
        if !self.exists() {
            return String::new();
        }

        let Ok(model_type) = self.model_type(base) else {
            return self.id.clone();
        };

        model_type
            .cache()
            .peek(&self.id)
            .and_then(|record| record.fields.get(model_type.primary_field()).cloned())
            .map(|value| value.to_string())
            .unwrap_or_else(|| self.id.clone())
    }

    /// Sends staged edits to the service. Not implemented.
    pub fn push(&self) -> Result<()> {
        unsupported("pushing record changes")
    }

    /// Deletes the record on the service. Not implemented.
    pub fn delete(&self) -> Result<()> {
        unsupported("deleting records")
    }

    /// Reverts pushed changes. Not implemented.
    pub fn revert(&self) -> Result<()> {
        unsupported("reverting record changes")
    }
}

pub(crate) fn unsupported(what: &str) -> Result<()> {
    log::warn!("{what} is not implemented yet");
    Err(Error::unsupported_feature(format!("{what} is not implemented")))
}
