use crate::{Model, ModelList};

use airstorm_core::{Error, Result, Value};

/// The result of reading a field.
///
/// Scalar columns read as a [`Value`]. Foreign keys resolve to the linked
/// model instance (`one` relationships) or to a list of them (`many`).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    One(Model),
    Many(ModelList),
}

impl FieldValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_one(&self) -> Option<&Model> {
        match self {
            FieldValue::One(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&ModelList> {
        match self {
            FieldValue::Many(list) => Some(list),
            _ => None,
        }
    }

    pub fn into_value(self) -> Result<Value> {
        match self {
            FieldValue::Value(value) => Ok(value),
            other => Err(unexpected("a value", &other)),
        }
    }

    pub fn into_one(self) -> Result<Model> {
        match self {
            FieldValue::One(model) => Ok(model),
            other => Err(unexpected("a single linked record", &other)),
        }
    }

    pub fn into_many(self) -> Result<ModelList> {
        match self {
            FieldValue::Many(list) => Ok(list),
            other => Err(unexpected("a list of linked records", &other)),
        }
    }

    /// Keys under which `group_by` files the record holding this value.
    ///
    /// Multi-valued results (lists, `many` links) yield one key per element,
    /// or a single null key when empty. Links are keyed by record id.
    pub fn keys(&self) -> Vec<Value> {
        let keys = match self {
            FieldValue::Value(Value::List(items)) => items.clone(),
            FieldValue::Many(list) => list.iter().map(record_key).collect(),
            _ => return vec![self.sort_key()],
        };

        if keys.is_empty() {
            vec![Value::Null]
        } else {
            keys
        }
    }

    /// The value compared by `filter`, `partition` and `sort_by`.
    pub fn sort_key(&self) -> Value {
        match self {
            FieldValue::Value(value) => value.clone(),
            FieldValue::One(model) => record_key(model),
            FieldValue::Many(list) => Value::List(list.iter().map(record_key).collect()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> FieldValue {
        FieldValue::Value(value)
    }
}

impl PartialEq<Value> for FieldValue {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

fn record_key(model: &Model) -> Value {
    if model.exists() {
        Value::String(model.id().to_string())
    } else {
        Value::Null
    }
}

fn unexpected(expected: &str, actual: &FieldValue) -> Error {
    let actual = match actual {
        FieldValue::Value(_) => "a value",
        FieldValue::One(_) => "a single linked record",
        FieldValue::Many(_) => "a list of linked records",
    };
    airstorm_core::err!("expected {expected}, field read as {actual}")
}
