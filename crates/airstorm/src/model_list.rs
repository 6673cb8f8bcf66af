use crate::{field_list::read_all, model::unsupported, Base, Field, FieldValue, Model, ModelListType};

use airstorm_core::{schema::TableId, Result, Value};
use indexmap::IndexMap;

/// An ordered collection of records of one table.
///
/// Like [`Model`], a list only holds identities; reads go through the
/// [`Base`]. Every member belongs to the list's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelList {
    table: TableId,
    members: Vec<Model>,
}

impl ModelList {
    /// Builds a list without checking its members. Callers guarantee they all
    /// belong to `table`.
    pub(crate) fn from_parts(table: TableId, members: Vec<Model>) -> ModelList {
        ModelList { table, members }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Model> {
        self.members.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Model] {
        &self.members
    }

    /// Record ids of the members, in list order
    pub fn ids(&self) -> Vec<&str> {
        self.members.iter().map(Model::id).collect()
    }

    pub fn list_type<'a>(&self, base: &'a Base) -> Result<&'a ModelListType> {
        base.model_list_type_by_id(&self.table)
    }

    /// Adds a member at the end of the list.
    pub fn append(&mut self, base: &Base, model: Model) -> Result<()> {
        self.list_type(base)?.check_member(base, &model)?;
        self.members.push(model);
        Ok(())
    }

    /// Reads a field of every member by its pluralized attribute, e.g.
    /// `"names"` for the `Name` column.
    pub async fn get_field(&self, base: &Base, attribute: &str) -> Result<Vec<FieldValue>> {
        let list_type = self.list_type(base)?;
        list_type.field_list_or_err(attribute)?.read(base, self).await
    }

    /// Stages `values[i]` on the `i`th member.
    pub fn set_each(&self, base: &Base, attribute: &str, values: Vec<Value>) -> Result<()> {
        let list_type = self.list_type(base)?;
        list_type
            .field_list_or_err(attribute)?
            .write_each(base, self, values)
    }

    /// Stages the same value on every member.
    pub fn set_all(&self, base: &Base, attribute: &str, value: impl Into<Value>) -> Result<()> {
        let list_type = self.list_type(base)?;
        list_type
            .field_list_or_err(attribute)?
            .write_all(base, self, value.into())
    }

    pub fn discard(&self, base: &Base, attribute: &str) -> Result<()> {
        let list_type = self.list_type(base)?;
        list_type.field_list_or_err(attribute)?.discard(base, self)
    }

    /// Buckets the members by the value of a field (singular attribute).
    ///
    /// Buckets are ordered by first appearance. A member whose field is
    /// multi-valued lands in the bucket of every element, or in the null
    /// bucket when it has none.
    pub async fn group_by(&self, base: &Base, attribute: &str) -> Result<IndexMap<Value, ModelList>> {
        let values = self.read(base, attribute).await?;
        let mut groups: IndexMap<Value, ModelList> = IndexMap::new();

        for (model, value) in self.members.iter().zip(values) {
            for key in value.keys() {
                groups
                    .entry(key)
                    .or_insert_with(|| ModelList::from_parts(self.table.clone(), vec![]))
                    .members
                    .push(model.clone());
            }
        }

        Ok(groups)
    }

    /// The members whose field equals `value`.
    pub async fn filter(&self, base: &Base, attribute: &str, value: impl Into<Value>) -> Result<ModelList> {
        let (matching, _) = self.partition(base, attribute, value).await?;
        Ok(matching)
    }

    /// Splits the members into those whose field equals `value` and the rest,
    /// both in list order.
    pub async fn partition(
        &self,
        base: &Base,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<(ModelList, ModelList)> {
        let value = value.into();
        let values = self.read(base, attribute).await?;

        let mut matching = ModelList::from_parts(self.table.clone(), vec![]);
        let mut rest = ModelList::from_parts(self.table.clone(), vec![]);

        for (model, field_value) in self.members.iter().zip(values) {
            if field_value.sort_key() == value {
                matching.members.push(model.clone());
            } else {
                rest.members.push(model.clone());
            }
        }

        Ok((matching, rest))
    }

    /// A copy of the list ordered by a field. The sort is stable in both
    /// directions: members with equal keys keep their relative order.
    pub async fn sort_by(&self, base: &Base, attribute: &str, descending: bool) -> Result<ModelList> {
        let values = self.read(base, attribute).await?;

        let mut keyed: Vec<_> = values
            .iter()
            .map(FieldValue::sort_key)
            .zip(self.members.iter().cloned())
            .collect();

        if descending {
            keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
        } else {
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        Ok(ModelList::from_parts(
            self.table.clone(),
            keyed.into_iter().map(|(_, model)| model).collect(),
        ))
    }

    /// Sends staged edits of every member to the service. Not implemented.
    pub fn push(&self) -> Result<()> {
        unsupported("pushing record changes")
    }

    /// Deletes every member on the service. Not implemented.
    pub fn delete(&self) -> Result<()> {
        unsupported("deleting records")
    }

    /// Reverts pushed changes. Not implemented.
    pub fn revert(&self) -> Result<()> {
        unsupported("reverting record changes")
    }

    async fn read(&self, base: &Base, attribute: &str) -> Result<Vec<FieldValue>> {
        let model_type = base.model_type_by_id(&self.table)?;
        let field: &Field = model_type.field_or_err(attribute)?;
        read_all(base, field, &self.members).await
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for ModelList {
    type Item = Model;
    type IntoIter = std::vec::IntoIter<Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
