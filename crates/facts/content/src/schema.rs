//! Fact schema loader.
//!
//! Loads fact declarations from RON files into a registry and a token set.
//!
//! File format: Vec<FactDecl>
//!
//! Example:
//! ```ron
//! [
//!     (name: "SIZE", kind: "CREATURE", format: Enumerated(["SMALL", "MEDIUM", "LARGE"])),
//!     (name: "DEITY", kind: "CREATURE", format: Reference("DEITY")),
//!     (name: "LEGS", kind: "CREATURE", format: Integer),
//! ]
//! ```

use std::path::Path;
use std::sync::Arc;

use facts_core::{FactDefinition, FactRegistry, FactToken, ObjectKind, ValueFormat};
use serde::Deserialize;

use crate::tokens::TokenSet;
use crate::{LoadResult, read_file};

/// One fact declaration as written in a schema file.
#[derive(Clone, Debug, Deserialize)]
pub struct FactDecl {
    pub name: String,
    pub kind: String,
    pub format: FormatSpec,
}

/// Serde-facing mirror of [`ValueFormat`].
#[derive(Clone, Debug, Deserialize)]
pub enum FormatSpec {
    Text,
    Integer,
    Boolean,
    Enumerated(Vec<String>),
    /// Kind name of the referenced objects.
    Reference(String),
}

impl FormatSpec {
    fn into_format(self) -> ValueFormat {
        match self {
            Self::Text => ValueFormat::Text,
            Self::Integer => ValueFormat::Integer,
            Self::Boolean => ValueFormat::Boolean,
            Self::Enumerated(choices) => ValueFormat::Enumerated { choices },
            Self::Reference(target) => ValueFormat::Reference {
                target: ObjectKind::new(target),
            },
        }
    }
}

/// A loaded schema: the registry plus one routed token per fact.
#[derive(Clone, Debug, Default)]
pub struct FactSchema {
    pub registry: FactRegistry,
    pub tokens: TokenSet,
}

/// Loader for fact schemas from RON files.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Load a fact schema from a RON file.
    ///
    /// Invalid declarations and duplicate (kind, name) pairs indicate a
    /// broken schema and abort the load.
    pub fn load(path: &Path) -> LoadResult<FactSchema> {
        let content = read_file(path)?;
        Self::load_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load fact schema {}: {}", path.display(), e))
    }

    /// Load a fact schema from RON text.
    pub fn load_str(content: &str) -> LoadResult<FactSchema> {
        let decls: Vec<FactDecl> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse fact schema RON: {}", e))?;

        let mut schema = FactSchema::default();
        for decl in decls {
            let def = FactDefinition::new(
                &decl.name,
                ObjectKind::new(&decl.kind),
                decl.format.into_format(),
            )
            .map_err(|e| anyhow::anyhow!("Invalid fact declaration '{}': {}", decl.name, e))?;
            let def = Arc::new(def);
            schema.registry.register(Arc::clone(&def))?;
            schema.tokens.insert(FactToken::new(def));
        }
        tracing::info!(facts = schema.registry.len(), "fact schema loaded");
        Ok(schema)
    }
}
