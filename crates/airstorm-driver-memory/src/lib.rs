//! An in-memory stand-in for the remote service.
//!
//! Tables are loaded from JSON fixtures shaped like the service's list
//! responses, keyed by table id. Filters are evaluated with a small formula
//! interpreter covering record-id membership and field comparisons.

mod formula;
use formula::Expr;

use airstorm_core::{
    async_trait,
    driver::{
        operation::{GetRecord, ListRecords, Operation},
        Driver, Response,
    },
    schema::TableId,
    Error, RawRecord, RecordId, Result,
};
use indexmap::IndexMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

type Table = IndexMap<RecordId, RawRecord>;

/// In-memory driver. Clones share the same tables and counters.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tables: Mutex<IndexMap<TableId, Table>>,

    /// Number of operations executed so far
    exec_count: AtomicUsize,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Builds a driver from a fixture document:
    /// `{ "tblXXX": [ { "id": "recXXX", "fields": { ... } } ] }`.
    pub fn from_fixture(src: &str) -> Result<Memory> {
        let tables: IndexMap<String, Vec<RawRecord>> = serde_json::from_str(src)?;

        let memory = Memory::new();
        for (table, records) in tables {
            memory.load(table, records);
        }

        Ok(memory)
    }

    /// Adds records to a table, replacing records with the same id.
    pub fn load(&self, table: impl Into<TableId>, records: impl IntoIterator<Item = RawRecord>) {
        let mut tables = self.lock();
        let table = tables.entry(table.into()).or_default();

        for record in records {
            table.insert(record.id.clone(), record);
        }
    }

    /// Number of operations executed, i.e. remote round trips.
    pub fn exec_count(&self) -> usize {
        self.inner.exec_count.load(Ordering::SeqCst)
    }

    fn get_record(&self, op: GetRecord) -> Result<Response> {
        let tables = self.lock();
        let table = get_table(&tables, &op.table)?;

        match table.get(&op.id) {
            Some(record) => Ok(Response::record(record.clone())),
            None => Err(Error::record_not_found(format!(
                "table={} id={}",
                op.table, op.id
            ))),
        }
    }

    fn list_records(&self, op: ListRecords) -> Result<Response> {
        let filter = match op.filter.as_ref().filter(|formula| !formula.is_empty()) {
            Some(formula) => Some(Expr::parse(formula.as_str())?),
            None => None,
        };

        let tables = self.lock();
        let table = get_table(&tables, &op.table)?;

        let mut records = vec![];
        for record in table.values() {
            if filter.as_ref().map_or(true, |expr| expr.matches(record)) {
                records.push(record.clone());
            }
        }

        Ok(Response::records(records))
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<TableId, Table>> {
        self.inner
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn get_table<'a>(tables: &'a IndexMap<TableId, Table>, id: &TableId) -> Result<&'a Table> {
    tables.get(id).ok_or_else(|| {
        Error::driver(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("unknown table {id}"),
        ))
    })
}

#[async_trait]
impl Driver for Memory {
    async fn exec(&self, op: Operation) -> Result<Response> {
        self.inner.exec_count.fetch_add(1, Ordering::SeqCst);
        log::trace!("memory driver exec; op={op:?}");

        match op {
            Operation::GetRecord(op) => self.get_record(op),
            Operation::ListRecords(op) => self.list_records(op),
        }
    }
}
