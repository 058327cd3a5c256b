//! File layer for the fact engine.
//!
//! This crate turns files into working parse state:
//! - RON schema files declare facts and become a populated registry plus one
//!   token per declared fact ([`schema`]);
//! - TOML policy files configure how a load pass treats duplicate entries
//!   ([`policy`]);
//! - line-oriented `.lst` data files are applied to an object store entry by
//!   entry, accumulating per-entry issues instead of aborting ([`loader`]).
//!
//! All loaders report file-level failures through `anyhow` with the path in
//! the message; per-entry data problems never surface as `Err`, they land in
//! the pass's [`loader::LoadReport`].

pub mod factory;
pub mod loader;
pub mod policy;
pub mod schema;
pub mod store;
pub mod tokens;

pub use factory::DataFactory;
pub use loader::{DataLoader, LoadIssue, LoadReport};
pub use policy::{DuplicatePolicy, LoadPolicy, PolicyLoader};
pub use schema::{FactDecl, FactSchema, FormatSpec, SchemaLoader};
pub use store::ObjectStore;
pub use tokens::TokenSet;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
