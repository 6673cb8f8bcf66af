use super::*;

use crate::RecordId;

#[derive(Debug, Clone, PartialEq)]
pub struct GetRecord {
    /// Which table to get from
    pub table: TableId,

    /// Which record to fetch
    pub id: RecordId,
}

impl From<GetRecord> for Operation {
    fn from(value: GetRecord) -> Self {
        Self::GetRecord(value)
    }
}
