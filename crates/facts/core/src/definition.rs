//! Fact definitions and storage keys.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{ErrorSeverity, FactError};
use crate::format::{FormatKind, ValueFormat};
use crate::object::ObjectKind;

/// Opaque handle distinguishing one fact's storage slot from another.
///
/// Identity is a process-unique id minted at allocation, never the fact's
/// display name, so two facts that happen to share a name (on different
/// kinds, or across registries) can never collide in storage. The format
/// kind rides along for diagnostics only; equality and hashing use the id
/// alone.
#[derive(Clone, Copy, Debug)]
pub struct FactKey {
    id: u32,
    kind: FormatKind,
}

static NEXT_KEY_ID: AtomicU32 = AtomicU32::new(0);

impl FactKey {
    /// Mints a fresh key for values of the given format kind.
    pub fn allocate(kind: FormatKind) -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            kind,
        }
    }

    /// Returns the format kind of the values stored under this key.
    pub fn format_kind(&self) -> FormatKind {
        self.kind
    }
}

impl PartialEq for FactKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FactKey {}

impl std::hash::Hash for FactKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{}/{}", self.id, self.kind)
    }
}

/// Errors raised when a fact declaration is unusable.
///
/// These are fatal: a bad definition means a broken schema, not bad data,
/// and no token is ever built from it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// The declared fact name is blank.
    #[error("fact name must not be blank")]
    BlankName,

    /// An enumerated format was declared with no choices.
    #[error("enumerated fact '{name}' declares no choices")]
    EmptyChoices { name: String },
}

impl FactError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BlankName => "DEFINITION_BLANK_NAME",
            Self::EmptyChoices { .. } => "DEFINITION_EMPTY_CHOICES",
        }
    }
}

/// Static metadata for one declared fact.
///
/// Ties together the fact's data-file name, the kind of object it may attach
/// to, the key its values are stored under, and the format of those values.
/// Immutable once constructed; the constructor validates its inputs and
/// fails fast so nothing downstream ever sees a half-formed definition.
#[derive(Clone, Debug)]
pub struct FactDefinition {
    name: String,
    kind: ObjectKind,
    key: FactKey,
    format: ValueFormat,
}

impl FactDefinition {
    /// Builds a definition, allocating a fresh storage key.
    ///
    /// The name is case-normalized to uppercase, matching how data files are
    /// tokenized.
    pub fn new(
        name: impl AsRef<str>,
        kind: ObjectKind,
        format: ValueFormat,
    ) -> Result<Self, DefinitionError> {
        let name = name.as_ref().trim().to_ascii_uppercase();
        if name.is_empty() {
            return Err(DefinitionError::BlankName);
        }
        if let ValueFormat::Enumerated { choices } = &format
            && choices.is_empty()
        {
            return Err(DefinitionError::EmptyChoices { name });
        }
        let key = FactKey::allocate(format.kind());
        Ok(Self {
            name,
            kind,
            key,
            format,
        })
    }

    /// The fact's declared (normalized) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of object this fact may attach to.
    pub fn usable_kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// The key this fact's values are stored under.
    pub fn fact_key(&self) -> FactKey {
        self.key
    }

    /// The declared value format.
    pub fn format(&self) -> &ValueFormat {
        &self.format
    }
}
