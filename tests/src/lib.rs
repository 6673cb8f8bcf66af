pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};

pub use std_util::*;

use airstorm::{Base, Builder, Memory, RawRecord, Schema};
use std::sync::{Arc, Mutex};

/// Schema of the grocery base the tests run against
pub const SCHEMA: &str = include_str!("../fixtures/schema.json");

/// Records of the grocery base, keyed by table id
pub const RECORDS: &str = include_str!("../fixtures/records.json");

pub fn schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}

/// Fixture records of one table
pub fn records(table: &str) -> Vec<RawRecord> {
    let mut tables: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(RECORDS).unwrap();
    let records = tables.remove(table).unwrap_or_default();
    serde_json::from_value(records).unwrap()
}

/// A builder loaded with the fixture schema
pub fn builder() -> Builder {
    let mut builder = Base::builder();
    builder.schema(schema());
    builder
}

/// A base over the in-memory fixture service whose round trips are logged.
pub struct BaseTest {
    memory: Memory,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl BaseTest {
    pub fn new() -> BaseTest {
        let _ = env_logger::builder().is_test(true).try_init();

        BaseTest {
            memory: Memory::from_fixture(RECORDS).unwrap(),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Build a base from the fixture schema
    pub async fn setup(&mut self) -> Base {
        self.setup_with(&mut builder()).await
    }

    /// Build a base from a configured builder
    pub async fn setup_with(&mut self, builder: &mut Builder) -> Base {
        let driver = LoggingDriver::new(self.memory.clone());
        self.ops_log = driver.ops_log_handle();
        builder.build(driver).await.unwrap()
    }

    /// Round trips made by the last base built
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}

impl Default for BaseTest {
    fn default() -> Self {
        BaseTest::new()
    }
}

/// Install the test logger for tests not using [`BaseTest`]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
