//! Value formats and indirect values.
//!
//! A [`ValueFormat`] converts the raw text of a data-file entry into a typed
//! value and classifies what kind of value a fact stores. Conversion always
//! happens synchronously at parse time so malformed input is reported at the
//! point of error, but *resolution* of a reference to another object may be
//! deferred until every file has loaded — the referenced object may not exist
//! yet when its name is first seen.
//!
//! The result of a conversion is an [`IndirectValue`]: the typed payload (or
//! a deferred reference to one) paired with the exact original text. Unparse
//! re-emits that original text verbatim, which is what makes round-trips
//! byte-faithful even for formats whose canonical spelling is ambiguous.

use crate::DOT_CLEAR;
use crate::error::{ErrorSeverity, FactError};
use crate::object::{ObjectId, ObjectKind};

/// Discriminant of a [`ValueFormat`], used for diagnostics and key tagging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatKind {
    Text,
    Integer,
    Boolean,
    Enumerated,
    Reference,
}

/// A resolved, typed fact value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactValue {
    /// Free-form text.
    Text(String),

    /// Signed integer literal.
    Integer(i64),

    /// Boolean literal (`YES`/`NO`/`TRUE`/`FALSE` in data files).
    Boolean(bool),

    /// Canonical member of an enumerated format's choice list.
    Choice(String),

    /// Another loaded object, after deferred resolution.
    Object(ObjectId),
}

/// Resolves deferred references once all data has loaded.
///
/// Implemented by the loader's object table; the engine only consumes it.
pub trait ReferenceResolver {
    /// Looks up an object of `kind` by its data-file name.
    fn resolve(&self, kind: &ObjectKind, key: &str) -> Option<ObjectId>;
}

/// Errors raised when raw text is not a legal literal for a declared format.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatError {
    /// Text is not a signed integer literal.
    #[error("'{text}' is not an integer")]
    NotInteger { text: String },

    /// Text is not one of the recognized boolean literals.
    #[error("'{text}' is not a boolean (expected YES, NO, TRUE, or FALSE)")]
    NotBoolean { text: String },

    /// Text matches none of the enumerated format's choices.
    #[error("'{text}' is not a valid choice")]
    NotAChoice { text: String },

    /// Text is not syntactically usable as a reference to another object.
    #[error("'{text}' is not a well-formed {target} reference: {reason}")]
    MalformedReference {
        text: String,
        target: ObjectKind,
        reason: String,
    },

    /// Text collides with a reserved literal and can never be a value.
    #[error("'{text}' is a reserved literal")]
    ReservedLiteral { text: String },
}

impl FactError for FormatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use FormatError::*;
        match self {
            NotInteger { .. } => "FORMAT_NOT_INTEGER",
            NotBoolean { .. } => "FORMAT_NOT_BOOLEAN",
            NotAChoice { .. } => "FORMAT_NOT_A_CHOICE",
            MalformedReference { .. } => "FORMAT_MALFORMED_REFERENCE",
            ReservedLiteral { .. } => "FORMAT_RESERVED_LITERAL",
        }
    }
}

/// Error raised when reading a deferred reference that never materialized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    /// The referenced object was not present in any loaded file.
    #[error("no {target} named '{key}' was loaded")]
    UnknownReference { target: ObjectKind, key: String },
}

impl FactError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownReference { .. } => "RESOLVE_UNKNOWN_REFERENCE",
        }
    }
}

/// The declared format of a fact's values.
///
/// Formats are data-driven: an enumerated format carries its choice list and
/// a reference format carries the kind of object it points at, both taken
/// from the schema declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    Text,
    Integer,
    Boolean,
    /// Closed set of legal spellings; matching is case-insensitive and the
    /// canonical spelling from the choice list is what gets stored.
    Enumerated { choices: Vec<String> },
    /// Forward reference to another object of the given kind. Syntax is
    /// checked at conversion time; the target is looked up only when the
    /// typed value is read.
    Reference { target: ObjectKind },
}

impl ValueFormat {
    pub fn kind(&self) -> FormatKind {
        match self {
            Self::Text => FormatKind::Text,
            Self::Integer => FormatKind::Integer,
            Self::Boolean => FormatKind::Boolean,
            Self::Enumerated { .. } => FormatKind::Enumerated,
            Self::Reference { .. } => FormatKind::Reference,
        }
    }

    /// Converts raw entry text into an [`IndirectValue`].
    ///
    /// Validation is complete and synchronous: if this returns `Ok`, the text
    /// was a legal literal for this format (though a reference's target may
    /// still be missing at resolution time). The original text is preserved
    /// verbatim in the returned value.
    pub fn convert(&self, raw: &str) -> Result<IndirectValue, FormatError> {
        let payload = match self {
            Self::Text => {
                // The clear sentinel is reserved in every format; text is the
                // only one that would otherwise accept it.
                if raw == DOT_CLEAR {
                    return Err(FormatError::ReservedLiteral { text: raw.into() });
                }
                Payload::Resolved(FactValue::Text(raw.to_owned()))
            }
            Self::Integer => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| FormatError::NotInteger { text: raw.into() })?;
                Payload::Resolved(FactValue::Integer(n))
            }
            Self::Boolean => {
                let b = if raw.eq_ignore_ascii_case("YES") || raw.eq_ignore_ascii_case("TRUE") {
                    true
                } else if raw.eq_ignore_ascii_case("NO") || raw.eq_ignore_ascii_case("FALSE") {
                    false
                } else {
                    return Err(FormatError::NotBoolean { text: raw.into() });
                };
                Payload::Resolved(FactValue::Boolean(b))
            }
            Self::Enumerated { choices } => {
                let canonical = choices
                    .iter()
                    .find(|c| c.eq_ignore_ascii_case(raw))
                    .ok_or_else(|| FormatError::NotAChoice { text: raw.into() })?;
                Payload::Resolved(FactValue::Choice(canonical.clone()))
            }
            Self::Reference { target } => {
                check_reference_syntax(raw, target)?;
                Payload::Deferred {
                    target: target.clone(),
                    key: raw.to_owned(),
                }
            }
        };
        Ok(IndirectValue {
            raw: raw.to_owned(),
            payload,
        })
    }
}

/// Rejects text that can never name an object, without consulting any table.
fn check_reference_syntax(raw: &str, target: &ObjectKind) -> Result<(), FormatError> {
    let err = |reason: &str| FormatError::MalformedReference {
        text: raw.into(),
        target: target.clone(),
        reason: reason.to_owned(),
    };
    if raw.trim().is_empty() {
        return Err(err("blank name"));
    }
    if raw.starts_with('.') {
        // Leading dot is reserved for sentinels like .CLEAR.
        return Err(err("leading '.' is reserved"));
    }
    if raw.chars().any(|c| c == '|' || c == '\t' || c.is_control()) {
        return Err(err("contains a separator or control character"));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Payload {
    Resolved(FactValue),
    Deferred { target: ObjectKind, key: String },
}

/// A converted value paired with the exact text that produced it.
///
/// Two obligations, per the round-trip contract:
/// - [`IndirectValue::resolve`] yields the typed value, performing the
///   deferred lookup for reference formats;
/// - [`IndirectValue::unconverted`] yields the original text verbatim, so
///   that re-parsing the emitted text reproduces an equivalent value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndirectValue {
    raw: String,
    payload: Payload,
}

impl IndirectValue {
    /// Returns the original unconverted text, byte for byte.
    pub fn unconverted(&self) -> &str {
        &self.raw
    }

    /// Returns the typed value without consulting a resolver, if it does not
    /// need one. `None` means the value is a still-deferred reference.
    pub fn resolved(&self) -> Option<&FactValue> {
        match &self.payload {
            Payload::Resolved(value) => Some(value),
            Payload::Deferred { .. } => None,
        }
    }

    /// Returns the typed value, resolving a deferred reference through the
    /// given resolver. Safe to call repeatedly; resolution has no side
    /// effects on the value itself.
    pub fn resolve(&self, resolver: &dyn ReferenceResolver) -> Result<FactValue, ResolveError> {
        match &self.payload {
            Payload::Resolved(value) => Ok(value.clone()),
            Payload::Deferred { target, key } => resolver
                .resolve(target, key)
                .map(FactValue::Object)
                .ok_or_else(|| ResolveError::UnknownReference {
                    target: target.clone(),
                    key: key.clone(),
                }),
        }
    }
}
