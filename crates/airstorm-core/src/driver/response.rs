use crate::RawRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Records returned by the operation, in service order
    pub records: Vec<RawRecord>,
}

impl Response {
    pub fn records(records: impl IntoIterator<Item = RawRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn record(record: RawRecord) -> Self {
        Self {
            records: vec![record],
        }
    }

    /// Takes the single record returned by a `GetRecord` operation.
    pub fn into_record(self) -> crate::Result<RawRecord> {
        let count = self.records.len();
        let mut records = self.records.into_iter();

        match (records.next(), count) {
            (Some(record), 1) => Ok(record),
            _ => Err(crate::err!("expected exactly one record, got {count}")),
        }
    }
}
