mod get_record;
pub use get_record::GetRecord;

mod list_records;
pub use list_records::ListRecords;

use crate::schema::TableId;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fetch a single record by id
    GetRecord(GetRecord),

    /// Fetch every record of a table, optionally filtered by a formula
    ListRecords(ListRecords),
}

impl Operation {
    pub fn table(&self) -> &TableId {
        match self {
            Operation::GetRecord(op) => &op.table,
            Operation::ListRecords(op) => &op.table,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetRecord(_) => "GetRecord",
            Operation::ListRecords(_) => "ListRecords",
        }
    }

    pub fn is_get_record(&self) -> bool {
        matches!(self, Operation::GetRecord(_))
    }

    pub fn is_list_records(&self) -> bool {
        matches!(self, Operation::ListRecords(_))
    }
}
