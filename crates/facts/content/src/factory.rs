//! Data factory for loading a fact environment from a data directory.

use std::path::{Path, PathBuf};

use facts_core::ObjectKind;

use crate::loader::{DataLoader, LoadReport};
use crate::policy::{LoadPolicy, PolicyLoader};
use crate::schema::{FactSchema, SchemaLoader};
use crate::store::ObjectStore;
use crate::LoadResult;

/// Loads fact schema, policy, and data files from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── facts.ron
/// ├── policy.toml      (optional)
/// ├── creatures.lst
/// └── deities.lst
/// ```
pub struct DataFactory {
    data_dir: PathBuf,
}

impl DataFactory {
    /// Creates a new data factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the fact schema from `facts.ron`.
    pub fn load_schema(&self) -> LoadResult<FactSchema> {
        let path = self.data_dir.join("facts.ron");
        SchemaLoader::load(&path)
    }

    /// Load the load policy from `policy.toml`, defaulting when absent.
    pub fn load_policy(&self) -> LoadResult<LoadPolicy> {
        let path = self.data_dir.join("policy.toml");
        PolicyLoader::load_or_default(&path)
    }

    /// Load one data file of objects of the given kind into the store.
    ///
    /// # Arguments
    ///
    /// * `schema` - Loaded fact schema (load via `load_schema()`)
    /// * `policy` - Load policy (load via `load_policy()`)
    /// * `file` - File name under the data directory, e.g. `"creatures.lst"`
    /// * `kind` - Kind of every object in the file
    pub fn load_data_file(
        &self,
        schema: &FactSchema,
        policy: LoadPolicy,
        file: &str,
        kind: &ObjectKind,
        store: &mut ObjectStore,
    ) -> LoadResult<LoadReport> {
        let path = self.data_dir.join(file);
        DataLoader::new(&schema.tokens, policy).load_file(&path, kind, store)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
