use airstorm_core::{
    driver::{operation, Driver},
    schema::TableId,
    Formula, RawRecord, RecordId, Result,
};

use indexmap::{IndexMap, IndexSet};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

/// Local store of one table's raw records.
///
/// Reads are served from memory first; a miss fetches the record from the
/// remote service and keeps it. An *indexed* cache holds the whole table, so
/// unfiltered selects never leave the process.
pub struct Cache {
    table: TableId,
    driver: Arc<dyn Driver>,
    records: Mutex<IndexMap<RecordId, RawRecord>>,
    indexed: AtomicBool,
}

impl Cache {
    pub(crate) fn new(table: TableId, driver: Arc<dyn Driver>) -> Cache {
        Cache {
            table,
            driver,
            records: Mutex::new(IndexMap::new()),
            indexed: AtomicBool::new(false),
        }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table
    }

    /// Returns the record with the given id, fetching it on a miss.
    ///
    /// An id unknown to the service is cached as an empty record and returned
    /// as such; any other remote failure propagates.
    pub async fn get(&self, id: &str) -> Result<RawRecord> {
        if id.is_empty() {
            return Ok(RawRecord::empty());
        }

        if let Some(record) = self.peek(id) {
            return Ok(record);
        }

        log::debug!("fetching record; table={} id={id}", self.table);

        let op = operation::GetRecord {
            table: self.table.clone(),
            id: id.to_string(),
        };

        let record = match self.driver.exec(op.into()).await {
            Ok(response) => response.into_record()?,
            Err(err) if err.is_record_not_found() => {
                log::warn!("record {id} was not found; table={}", self.table);
                RawRecord::empty()
            }
            Err(err) => return Err(err),
        };

        // First fill wins
        let mut records = self.lock();
        let record = records.entry(id.to_string()).or_insert(record);
        Ok(record.clone())
    }

    /// Returns the records matching `filter`, keyed by id in service order.
    ///
    /// Without a filter, an indexed cache answers locally. Otherwise the
    /// service is queried and the returned records replace their cached
    /// copies.
    pub async fn select(&self, filter: Option<&Formula>) -> Result<IndexMap<RecordId, RawRecord>> {
        let filter = filter.filter(|formula| !formula.is_empty());

        if filter.is_none() && self.is_indexed() {
            return Ok(self
                .lock()
                .iter()
                .filter(|(_, record)| !record.is_empty())
                .map(|(id, record)| (id.clone(), record.clone()))
                .collect());
        }

        log::debug!(
            "selecting records; table={} filter={}",
            self.table,
            filter.map(Formula::as_str).unwrap_or("")
        );

        let op = operation::ListRecords {
            table: self.table.clone(),
            filter: filter.cloned(),
        };

        let response = self.driver.exec(op.into()).await?;

        let selected: IndexMap<_, _> = response
            .records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let mut records = self.lock();
        for (id, record) in &selected {
            records.insert(id.clone(), record.clone());
        }

        Ok(selected)
    }

    /// Loads the whole table and marks the cache as indexed.
    pub async fn index(&self) -> Result<()> {
        let records = self.select(None).await?;
        log::debug!("indexed table; table={} records={}", self.table, records.len());
        self.indexed.store(true, Ordering::Release);
        Ok(())
    }

    /// Makes sure every id in `ids` is cached, using at most one remote
    /// select.
    ///
    /// Ids the select does not return are cached as empty records, the same
    /// way a single-record miss is.
    pub async fn prefetch<I>(&self, ids: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.is_indexed() {
            return Ok(());
        }

        let missing = self.missing(ids);
        if missing.is_empty() {
            return Ok(());
        }

        log::debug!(
            "prefetching records; table={} count={}",
            self.table,
            missing.len()
        );

        let found = self.select(Some(&Formula::record_id_in(&missing))).await?;

        let mut records = self.lock();
        for id in missing {
            if !found.contains_key(&id) {
                log::warn!("record {id} was not found; table={}", self.table);
                records.entry(id).or_insert_with(RawRecord::empty);
            }
        }

        Ok(())
    }

    /// Returns the cached record without contacting the service.
    pub fn peek(&self, id: &str) -> Option<RawRecord> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Stores a record, replacing any cached copy.
    pub fn insert(&self, record: RawRecord) {
        self.lock().insert(record.id.clone(), record);
    }

    pub fn extend(&self, records: impl IntoIterator<Item = RawRecord>) {
        let mut cached = self.lock();
        for record in records {
            cached.insert(record.id.clone(), record);
        }
    }

    /// The distinct, non-empty ids of `ids` that are not cached, in first-seen
    /// order.
    pub fn missing<I>(&self, ids: I) -> Vec<RecordId>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let records = self.lock();
        ids.into_iter()
            .map(|id| id.as_ref().to_string())
            .filter(|id| !id.is_empty() && !records.contains_key(id))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed.load(Ordering::Acquire)
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<RecordId, RawRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Cache")
            .field("table", &self.table)
            .field("records", &self.len())
            .field("indexed", &self.is_indexed())
            .finish()
    }
}
