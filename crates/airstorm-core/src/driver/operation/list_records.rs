use super::*;

use crate::Formula;

#[derive(Debug, Clone, PartialEq)]
pub struct ListRecords {
    /// Which table to list
    pub table: TableId,

    /// Only return records matching this formula. `None` returns the whole
    /// table.
    pub filter: Option<Formula>,
}

impl From<ListRecords> for Operation {
    fn from(value: ListRecords) -> Self {
        Self::ListRecords(value)
    }
}
