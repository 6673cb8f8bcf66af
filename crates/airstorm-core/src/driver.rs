mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// The remote tabular-data service.
///
/// A driver executes one operation at a time on behalf of a table's record
/// cache. Single-record fetches must fail with [`Error::record_not_found`]
/// when the id does not exist; every other failure is reported with
/// [`Error::driver`] and propagates to the caller.
///
/// [`Error::record_not_found`]: crate::Error::record_not_found
/// [`Error::driver`]: crate::Error::driver
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute an operation against the remote service
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}

/// Driver used when a base is built without one. Every operation fails, so
/// only records already in the caches can be read.
#[derive(Debug, Default)]
pub struct Disconnected;

#[async_trait]
impl Driver for Disconnected {
    async fn exec(&self, op: Operation) -> crate::Result<Response> {
        Err(crate::Error::driver(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            format!("no driver configured; cannot execute {}", op.name()),
        )))
    }
}
