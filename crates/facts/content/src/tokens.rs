//! Token routing table.
//!
//! One [`FactToken`] per declared fact, routed by (owning kind, entry name).
//! Built once while the schema loads, read-only during data-file parsing.

use std::collections::HashMap;

use facts_core::{FactToken, ObjectKind};

/// Routes `FACT:NAME` entries to the token that parses them.
#[derive(Clone, Debug, Default)]
pub struct TokenSet {
    tokens: HashMap<(ObjectKind, String), FactToken>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token under its fact's name and owning kind.
    ///
    /// The schema loader rejects duplicates before tokens are built, so a
    /// collision here would be a loader bug; the later registration wins.
    pub fn insert(&mut self, token: FactToken) {
        let slot = (
            token.definition().usable_kind().clone(),
            token.token_name().to_owned(),
        );
        self.tokens.insert(slot, token);
    }

    /// Looks up the token for an entry name on the given kind.
    pub fn get(&self, kind: &ObjectKind, name: &str) -> Option<&FactToken> {
        let name = name.trim().to_ascii_uppercase();
        self.tokens.get(&(kind.clone(), name))
    }

    /// Tokens usable on the given kind, sorted by fact name for
    /// deterministic serialization.
    pub fn tokens_for_kind(&self, kind: &ObjectKind) -> Vec<&FactToken> {
        let mut out: Vec<&FactToken> = self
            .tokens
            .iter()
            .filter(|((k, _), _)| k == kind)
            .map(|(_, token)| token)
            .collect();
        out.sort_by(|a, b| a.token_name().cmp(b.token_name()));
        out
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
