use super::Schema;
use crate::{Error, Result};

use std::collections::HashSet;

impl Schema {
    /// Checks that table ids are unique and that every foreign key names a
    /// table of this schema.
    pub fn verify(&self) -> Result<()> {
        let mut ids = HashSet::new();

        for table in &self.tables {
            if !ids.insert(&table.id) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table id `{}`",
                    table.id
                )));
            }
        }

        for table in &self.tables {
            for column in &table.columns {
                if !column.is_foreign_key() {
                    continue;
                }

                let Some(foreign_key) = column.foreign_key() else {
                    return Err(Error::invalid_schema(format!(
                        "foreign key `{}.{}` has no foreignTableId",
                        table.name, column.name
                    )));
                };

                if !ids.contains(foreign_key.foreign_table_id) {
                    return Err(Error::invalid_schema(format!(
                        "foreign key `{}.{}` references unknown table `{}`",
                        table.name, column.name, foreign_key.foreign_table_id
                    )));
                }
            }
        }

        Ok(())
    }
}
