use super::{resolve, Base, Shared};
use crate::{ModelListType, ModelType};

use airstorm_core::{
    driver::Driver,
    schema::{self, Schema},
    Error, Result,
};
use indexmap::IndexMap;
use std::{path::PathBuf, sync::Arc};

type Renamer = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Default)]
pub struct Builder {
    base_id: Option<String>,

    api_key: Option<String>,

    schema: Option<Schema>,

    /// Read at build time when no schema was given
    schema_path: Option<PathBuf>,

    /// Applied to table and column display names before they are normalized
    renamer: Option<Renamer>,

    /// Tables to load in full at build time
    index: Vec<String>,
}

impl Builder {
    /// Set the remote base id. Defaults to the id in the schema document.
    pub fn base_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.base_id = Some(id.into());
        self
    }

    pub fn api_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn schema(&mut self, schema: Schema) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    pub fn schema_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.schema_path = Some(path.into());
        self
    }

    /// Rename table and column display names before type names and
    /// attributes are derived from them.
    pub fn renamer(&mut self, renamer: impl Fn(&str) -> String + Send + Sync + 'static) -> &mut Self {
        self.renamer = Some(Arc::new(renamer));
        self
    }

    /// Load a table in full at build time. Accepts a table name, type name or
    /// table id.
    pub fn index(&mut self, table: impl Into<String>) -> &mut Self {
        self.index.push(table.into());
        self
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Base> {
        let schema = self.load_schema()?;
        let driver: Arc<dyn Driver> = Arc::new(driver);
        let rename = self.rename();

        let id = match &self.base_id {
            Some(id) => {
                if !schema.id.is_empty() && &schema.id != id {
                    log::warn!("base id {id} differs from schema id {}", schema.id);
                }
                id.clone()
            }
            None => schema.id.clone(),
        };

        // Register every table before anything is fetched: foreign keys
        // resolve through the registries, so indexing must wait for both to be
        // complete.
        let mut model_types = IndexMap::new();
        let mut names: IndexMap<String, _> = IndexMap::new();

        for table in schema.tables() {
            let name = schema::to_type_name(&rename(&table.name));

            if let Some(existing) = names.get(&name) {
                log::warn!(
                    "table `{}` normalizes to type name `{name}`, already used by table {existing}; \
                     it is only reachable by table name or id",
                    table.name,
                );
            } else {
                names.insert(name.clone(), table.id.clone());
            }

            let model_type = ModelType::new(table, name, &*rename, driver.clone());
            model_types.insert(table.id.clone(), model_type);
        }

        let model_list_types = model_types
            .values()
            .map(|model_type| (model_type.id().clone(), ModelListType::new(model_type)))
            .collect();

        let mut index = vec![];
        for target in &self.index {
            let Some(id) = resolve(&schema, &names, target) else {
                return Err(Error::invalid_schema(format!(
                    "cannot index `{target}`: no such table"
                )));
            };
            index.push(id);
        }

        let base = Base {
            shared: Arc::new(Shared {
                id,
                api_key: self.api_key.clone(),
                schema,
                model_types,
                model_list_types,
                names,
            }),
        };

        for id in &index {
            base.model_type_by_id(id)?.cache().index().await?;
        }

        Ok(base)
    }

    fn load_schema(&self) -> Result<Schema> {
        match (&self.schema, &self.schema_path) {
            (Some(schema), _) => {
                schema.verify()?;
                Ok(schema.clone())
            }
            (None, Some(path)) => Schema::from_path(path),
            (None, None) => Err(Error::invalid_schema(
                "no schema given; set one with `schema` or `schema_path`",
            )),
        }
    }

    fn rename(&self) -> Renamer {
        match &self.renamer {
            Some(renamer) => renamer.clone(),
            None => Arc::new(|name: &str| name.to_string()),
        }
    }
}
