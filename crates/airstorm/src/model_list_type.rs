use crate::{Base, FieldList, Model, ModelList, ModelType};

use airstorm_core::{schema::TableId, Error, Formula, Result};
use indexmap::IndexMap;

/// The collection type synthesized for one table, e.g. `FruitList`.
///
/// Exposes every field of the model type as a [`FieldList`] under the
/// pluralized attribute name.
pub struct ModelListType {
    /// Same as the table id
    id: TableId,

    /// `<TypeName>List`
    name: String,

    field_lists: IndexMap<String, FieldList>,
}

impl ModelListType {
    pub(crate) fn new(model_type: &ModelType) -> ModelListType {
        let mut field_lists: IndexMap<String, FieldList> = IndexMap::new();

        for field in model_type.fields() {
            let field_list = FieldList::new(field.clone());

            if let Some(existing) = field_lists.get(field_list.attribute()) {
                log::warn!(
                    "field `{}` of {} pluralizes to `{}`, already used by field `{}`; skipping",
                    field.attribute(),
                    model_type.name(),
                    field_list.attribute(),
                    existing.field().attribute(),
                );
                continue;
            }

            field_lists.insert(field_list.attribute().to_string(), field_list);
        }

        ModelListType {
            id: model_type.id().clone(),
            name: format!("{}List", model_type.name()),
            field_lists,
        }
    }

    /// The table id
    pub fn id(&self) -> &TableId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_list(&self, attribute: &str) -> Option<&FieldList> {
        self.field_lists.get(attribute)
    }

    pub fn field_lists(&self) -> impl ExactSizeIterator<Item = &FieldList> {
        self.field_lists.values()
    }

    /// Builds a list from `members`, which must all be records of this table.
    pub fn new_list(&self, base: &Base, members: impl IntoIterator<Item = Model>) -> Result<ModelList> {
        let members: Vec<_> = members.into_iter().collect();

        for model in &members {
            self.check_member(base, model)?;
        }

        Ok(ModelList::from_parts(self.id.clone(), members))
    }

    pub fn empty_list(&self) -> ModelList {
        ModelList::from_parts(self.id.clone(), vec![])
    }

    /// Selects the records matching `filter`, a formula of the remote service.
    ///
    /// An empty filter selects the whole table, locally when the table is
    /// indexed.
    pub async fn find(&self, base: &Base, filter: &str) -> Result<ModelList> {
        let model_type = base.model_type_by_id(&self.id)?;
        let filter = Formula::new(filter);
        let records = model_type.cache().select(Some(&filter)).await?;

        let members = records
            .into_keys()
            .map(|id| Model::new(self.id.clone(), id))
            .collect();

        Ok(ModelList::from_parts(self.id.clone(), members))
    }

    pub(crate) fn field_list_or_err(&self, attribute: &str) -> Result<&FieldList> {
        self.field_list(attribute)
            .ok_or_else(|| Error::unknown_attribute(&self.name, attribute))
    }

    pub(crate) fn check_member(&self, base: &Base, model: &Model) -> Result<()> {
        if model.table_id() == &self.id {
            return Ok(());
        }

        let expected = base.model_type_by_id(&self.id)?;
        let actual = base.model_type_by_id(model.table_id())?;
        Err(Error::model_type_mismatch(expected.name(), actual.name()))
    }
}

impl std::fmt::Debug for ModelListType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("ModelListType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("field_lists", &self.field_lists.keys().collect::<Vec<_>>())
            .finish()
    }
}
