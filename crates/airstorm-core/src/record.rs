use crate::Value;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Remote record identifier, e.g. `recB4nW1YxG2Kc0aH`.
pub type RecordId = String;

/// A record as returned by the remote service: its id plus the cell values
/// keyed by column display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: RecordId,

    #[serde(default)]
    pub fields: IndexMap<String, Value>,

    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
}

impl RawRecord {
    pub fn new(id: impl Into<RecordId>) -> RawRecord {
        RawRecord {
            id: id.into(),
            ..RawRecord::default()
        }
    }

    /// The record cached in place of an id the service does not know.
    pub fn empty() -> RawRecord {
        RawRecord::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.fields.is_empty()
    }

    pub fn field(&self, column_name: &str) -> Option<&Value> {
        self.fields.get(column_name)
    }

    pub fn with_field(mut self, column_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(column_name.into(), value.into());
        self
    }
}
