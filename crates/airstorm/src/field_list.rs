use crate::{Base, Field, FieldValue, Model, ModelList, ModelType};

use airstorm_core::{schema, Error, Result, Value};
use indexmap::IndexSet;

/// Accessor for one column across every member of a [`ModelList`].
///
/// Exposed under the pluralized attribute of its field, e.g. `seasons` for
/// `season`.
#[derive(Debug, Clone)]
pub struct FieldList {
    field: Field,

    /// Pluralized attribute name
    attribute: String,
}

impl FieldList {
    pub(crate) fn new(field: Field) -> FieldList {
        let attribute = schema::to_plural_identifier(field.attribute());
        FieldList { field, attribute }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The single-record accessor this list accessor is derived from
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn doc(&self) -> String {
        self.field.doc()
    }

    /// Reads the field of every member, in list order.
    pub async fn read(&self, base: &Base, list: &ModelList) -> Result<Vec<FieldValue>> {
        read_all(base, &self.field, list.members()).await
    }

    /// Stages `values[i]` on the `i`th member. Nothing is staged unless
    /// every member accepts the write.
    pub fn write_each(&self, base: &Base, list: &ModelList, values: Vec<Value>) -> Result<()> {
        if values.len() != list.len() {
            return Err(Error::length_mismatch(list.len(), values.len()));
        }

        let owner = self.check_write(base, list)?;
        for (model, value) in list.iter().zip(values) {
            owner.stage(model.id(), self.field.id(), value);
        }

        Ok(())
    }

    /// Stages the same value on every member. Nothing is staged unless every
    /// member accepts the write.
    pub fn write_all(&self, base: &Base, list: &ModelList, value: Value) -> Result<()> {
        let owner = self.check_write(base, list)?;
        for model in list {
            owner.stage(model.id(), self.field.id(), value.clone());
        }

        Ok(())
    }

    pub fn discard(&self, base: &Base, list: &ModelList) -> Result<()> {
        for model in list {
            self.field.owner(base, model)?;
        }

        for model in list {
            self.field.discard(base, model)?;
        }

        Ok(())
    }

    /// Returns the owner model type once every member passed the write checks.
    fn check_write<'a>(&self, base: &'a Base, list: &ModelList) -> Result<&'a ModelType> {
        let mut owner = base.model_type_by_id(self.field.table_id())?;
        for model in list {
            owner = self.field.check_write(base, model)?;
        }
        Ok(owner)
    }
}

/// Reads `field` of each member with batched fetching.
///
/// Member records missing from the owner's cache are fetched in one select.
/// For foreign keys, the linked ids of all members are then collected and the
/// ones missing from the target cache are fetched in one more select, so the
/// per-member reads are served locally.
pub(crate) async fn read_all(base: &Base, field: &Field, members: &[Model]) -> Result<Vec<FieldValue>> {
    let Some(first) = members.first() else {
        return Ok(vec![]);
    };

    let owner = field.owner(base, first)?;
    owner
        .cache()
        .prefetch(members.iter().map(Model::id))
        .await?;

    if let Some(target) = field.link_target(base)? {
        let mut ids = IndexSet::new();

        for model in members {
            if let Some(raw) = field.raw(owner, model).await? {
                let linked = raw.record_ids();
                if field.is_many() {
                    ids.extend(linked);
                } else {
                    ids.extend(linked.into_iter().take(1));
                }
            }
        }

        if !ids.is_empty() {
            log::debug!(
                "batching linked records; field={}.{} target={} ids={}",
                owner.name(),
                field.attribute(),
                target.name(),
                ids.len()
            );
            target.cache().prefetch(&ids).await?;
        }
    }

    let mut values = Vec::with_capacity(members.len());
    for model in members {
        values.push(field.read(base, model).await?);
    }

    Ok(values)
}
