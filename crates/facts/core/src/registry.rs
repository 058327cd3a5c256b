//! The fact registry.
//!
//! Populated once while the schema loads, then treated as read-only: every
//! lookup during data-file parsing goes through [`FactRegistry::lookup`],
//! and no registration ever happens concurrently with lookups.

use std::collections::HashMap;
use std::sync::Arc;

use crate::definition::FactDefinition;
use crate::error::{ErrorSeverity, FactError};
use crate::object::ObjectKind;

/// Error raised when a second fact is registered under an already-taken
/// (kind, name) pair. Fatal to schema loading.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("fact '{name}' is already registered for kind {kind}")]
pub struct DuplicateFactError {
    pub name: String,
    pub kind: ObjectKind,
}

impl FactError for DuplicateFactError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "REGISTRY_DUPLICATE_FACT"
    }
}

/// Maps (owning kind, fact name) to fact definitions.
#[derive(Clone, Debug, Default)]
pub struct FactRegistry {
    facts: HashMap<(ObjectKind, String), Arc<FactDefinition>>,
}

impl FactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under its declared name and owning kind.
    pub fn register(&mut self, def: Arc<FactDefinition>) -> Result<(), DuplicateFactError> {
        let slot = (def.usable_kind().clone(), def.name().to_owned());
        if self.facts.contains_key(&slot) {
            return Err(DuplicateFactError {
                name: def.name().to_owned(),
                kind: def.usable_kind().clone(),
            });
        }
        self.facts.insert(slot, def);
        Ok(())
    }

    /// Looks up the definition a token name denotes on the given kind, if
    /// any. Name matching is case-insensitive.
    pub fn lookup(&self, kind: &ObjectKind, name: &str) -> Option<&Arc<FactDefinition>> {
        let name = name.trim().to_ascii_uppercase();
        self.facts.get(&(kind.clone(), name))
    }

    /// Iterates every registered definition, in no particular order.
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<FactDefinition>> {
        self.facts.values()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
