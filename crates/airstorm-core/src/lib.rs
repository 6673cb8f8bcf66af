pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError};

mod formula;
pub use formula::Formula;

mod record;
pub use record::{RawRecord, RecordId};

pub mod schema;
pub use schema::Schema;

mod value;
pub use value::Value;

/// A Result type alias that uses Airstorm's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
