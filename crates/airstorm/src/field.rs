use crate::{Base, FieldValue, Model, ModelList, ModelType};

use airstorm_core::{
    schema::{self, Column, ColumnId, ForeignKey, Relationship, TableId},
    Error, Result, Value,
};

/// Accessor for one column of a model type.
///
/// A field knows how to pull its column out of a raw record, what to read when
/// the record has no cell for it, and, for foreign keys, how to turn the linked
/// record ids into model instances of the linked table.
#[derive(Debug, Clone)]
pub struct Field {
    /// Table owning the column
    table: TableId,

    column: Column,

    /// Identifier the field is exposed under, e.g. `main_fruit`
    attribute: String,
}

impl Field {
    pub(crate) fn new(table: TableId, column: Column, rename: &dyn Fn(&str) -> String) -> Field {
        let attribute = schema::to_identifier(&rename(&column.name));

        Field {
            table,
            column,
            attribute,
        }
    }

    /// The column id
    pub fn id(&self) -> &ColumnId {
        &self.column.id
    }

    /// The column display name
    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn table_id(&self) -> &TableId {
        &self.table
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn doc(&self) -> String {
        self.column.doc()
    }

    pub fn is_read_only(&self) -> bool {
        self.column.is_read_only()
    }

    pub fn default_value(&self) -> Value {
        self.column.default_value()
    }

    pub fn foreign_key(&self) -> Option<ForeignKey<'_>> {
        self.column.foreign_key()
    }

    /// Returns `true` for foreign keys linking to many records.
    pub fn is_many(&self) -> bool {
        self.foreign_key()
            .is_some_and(|fk| fk.relationship == Relationship::Many)
    }

    /// The field on the linked table holding the reverse side of this foreign
    /// key.
    pub fn symmetric_field<'a>(&self, base: &'a Base) -> Option<&'a Field> {
        let fk = self.foreign_key()?;
        let target = base.model_type_by_id(fk.foreign_table_id).ok()?;
        target.field_by_column_id(fk.symmetric_column_id?)
    }

    /// The model type a foreign key links to: the owner of the symmetric field
    /// when there is one, the foreign table otherwise.
    pub(crate) fn link_target<'a>(&self, base: &'a Base) -> Result<Option<&'a ModelType>> {
        let Some(fk) = self.foreign_key() else {
            return Ok(None);
        };

        let table = match self.symmetric_field(base) {
            Some(symmetric) => symmetric.table_id(),
            None => fk.foreign_table_id,
        };

        base.model_type_by_id(table).map(Some)
    }

    /// Reads the field of `model`.
    ///
    /// Staged edits win over the cache. Missing cells read as the column's
    /// default value. Foreign keys resolve to model instances of the linked
    /// table. A to-one link resolves only its first id; when a to-many link
    /// holds several records, the ones not cached yet are fetched in a single
    /// remote select first.
    pub async fn read(&self, base: &Base, model: &Model) -> Result<FieldValue> {
        let owner = self.owner(base, model)?;
        let raw = self.raw(owner, model).await?;

        let Some(fk) = self.foreign_key() else {
            return Ok(FieldValue::Value(
                raw.unwrap_or_else(|| self.default_value()),
            ));
        };

        let target = base.model_type_by_id(fk.foreign_table_id)?;
        let ids = raw.map(|raw| raw.record_ids()).unwrap_or_default();

        Ok(match fk.relationship {
            Relationship::One => FieldValue::One(match ids.first() {
                Some(id) => target.get(id).await?,
                None => target.empty(),
            }),
            Relationship::Many => {
                if ids.len() > 1 {
                    target.cache().prefetch(&ids).await?;
                }

                let mut models = Vec::with_capacity(ids.len());
                for id in &ids {
                    models.push(target.get(id).await?);
                }
                FieldValue::Many(ModelList::from_parts(target.id().clone(), models))
            }
        })
    }

    /// The cell of `model` for this column, without defaults or foreign key
    /// resolution. Null cells read as absent.
    pub(crate) async fn raw(&self, owner: &ModelType, model: &Model) -> Result<Option<Value>> {
        if let Some(staged) = owner.staged(model.id(), self.id()) {
            return Ok(Some(staged).filter(|value| !value.is_null()));
        }

        let record = owner.cache().get(model.id()).await?;
        Ok(record
            .fields
            .get(&self.column.name)
            .filter(|value| !value.is_null())
            .cloned())
    }

    /// Stages `value` as the local content of this field on `model`.
    pub fn write(&self, base: &Base, model: &Model, value: Value) -> Result<()> {
        let owner = self.check_write(base, model)?;
        owner.stage(model.id(), self.id(), value);
        Ok(())
    }

    /// Checks that `model` accepts a write to this field without staging
    /// anything.
    pub(crate) fn check_write<'a>(&self, base: &'a Base, model: &Model) -> Result<&'a ModelType> {
        let owner = self.owner(base, model)?;

        if self.is_read_only() {
            return Err(Error::read_only_field(format!(
                "{}.{}",
                owner.name(),
                self.attribute
            )));
        }

        if !model.exists() {
            return Err(Error::unbound_record(owner.name()));
        }

        Ok(owner)
    }

    /// Drops the edit staged on `model`, if any.
    pub fn discard(&self, base: &Base, model: &Model) -> Result<()> {
        let owner = self.owner(base, model)?;
        owner.unstage(model.id(), self.id());
        Ok(())
    }

    pub(crate) fn owner<'a>(&self, base: &'a Base, model: &Model) -> Result<&'a ModelType> {
        let owner = base.model_type_by_id(&self.table)?;

        if model.table_id() != &self.table {
            let actual = base.model_type_by_id(model.table_id())?;
            return Err(Error::model_type_mismatch(owner.name(), actual.name()));
        }

        Ok(owner)
    }
}
