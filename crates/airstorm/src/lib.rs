//! An object-relational mapper over a remote tabular-data service.
//!
//! A [`Base`] is built from a schema document. For every table it synthesizes
//! a [`ModelType`] exposing the table's columns as [`Field`]s and a
//! [`ModelListType`] exposing them as pluralized [`FieldList`]s. Records are
//! read through a per-table [`Cache`] that only calls the remote service on a
//! miss.
//!
//! ```ignore
//! let base = Base::builder()
//!     .schema_path("schema.json")
//!     .index("Fruits")
//!     .build(driver)
//!     .await?;
//!
//! let smoothie = base.model_type("Smoothie")?.get("recGreen").await?;
//! let fruits = smoothie.get(&base, "fruits").await?.into_many()?;
//! let names = fruits.get_field(&base, "names").await?;
//! ```

mod base;
pub use base::{Base, Builder};

mod cache;
pub use cache::Cache;

mod field;
pub use field::Field;

mod field_list;
pub use field_list::FieldList;

mod field_value;
pub use field_value::FieldValue;

mod model;
pub use model::Model;

mod model_list;
pub use model_list::ModelList;

mod model_list_type;
pub use model_list_type::ModelListType;

mod model_type;
pub use model_type::ModelType;

pub use airstorm_core::{
    driver::{self, Disconnected, Driver},
    schema::{self, Schema},
    Error, Formula, RawRecord, RecordId, Result, Value,
};

#[cfg(feature = "memory")]
pub use airstorm_driver_memory::Memory;
