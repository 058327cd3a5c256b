//! The fact token: one parser/serializer pair per declared fact.
//!
//! Tokens are manufactured, not written: building a [`FactToken`] from any
//! [`FactDefinition`] yields a working parser and serializer for that fact's
//! entry name, with no fact-specific code. A token holds nothing but a
//! shared reference to its definition, so a single instance is safely
//! reusable for every object of the matching kind and reentrant across
//! parses.

use std::sync::Arc;

use crate::DOT_CLEAR;
use crate::context::LoadContext;
use crate::definition::FactDefinition;
use crate::error::{ErrorSeverity, FactError};
use crate::format::FormatError;
use crate::object::ObjectId;

/// Per-entry parse failures.
///
/// These accumulate into the pass's load report; the entry is skipped,
/// nothing is stored, and the pass continues.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The entry had no value and no clear sentinel.
    #[error("FACT:{fact} on object {object}: empty value")]
    EmptyValue { fact: String, object: ObjectId },

    /// The value was not a legal literal for the fact's declared format.
    #[error("FACT:{fact} on object {object}: {source} (input was '{text}')")]
    Conversion {
        fact: String,
        object: ObjectId,
        text: String,
        #[source]
        source: FormatError,
    },
}

impl FactError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyValue { .. } => "PARSE_EMPTY_VALUE",
            Self::Conversion { .. } => "PARSE_CONVERSION",
        }
    }
}

/// Parser/serializer for a single declared fact.
#[derive(Clone, Debug)]
pub struct FactToken {
    def: Arc<FactDefinition>,
}

impl FactToken {
    pub fn new(def: Arc<FactDefinition>) -> Self {
        Self { def }
    }

    /// The entry name this token is routed under.
    pub fn token_name(&self) -> &str {
        self.def.name()
    }

    /// The fixed prefix fact entries appear under in data files.
    pub fn parent_token(&self) -> &'static str {
        "FACT"
    }

    /// The definition this token was built from.
    pub fn definition(&self) -> &Arc<FactDefinition> {
        &self.def
    }

    /// Applies one data-file entry to an object.
    ///
    /// A blank value is malformed and stores nothing. The clear sentinel
    /// removes any existing value and records the clear as explicit. Any
    /// other value goes through the fact's format conversion; on success the
    /// result overwrites whatever this pass stored earlier, on failure the
    /// prior value is left untouched.
    pub fn parse(
        &self,
        ctx: &mut dyn LoadContext,
        object: ObjectId,
        raw: &str,
    ) -> Result<(), ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyValue {
                fact: self.def.name().to_owned(),
                object,
            });
        }
        self.parse_non_empty(ctx, object, raw)
    }

    fn parse_non_empty(
        &self,
        ctx: &mut dyn LoadContext,
        object: ObjectId,
        raw: &str,
    ) -> Result<(), ParseError> {
        let key = self.def.fact_key();
        if raw == DOT_CLEAR {
            ctx.remove(object, key);
            return Ok(());
        }
        let value =
            self.def
                .format()
                .convert(raw)
                .map_err(|source| ParseError::Conversion {
                    fact: self.def.name().to_owned(),
                    object,
                    text: raw.to_owned(),
                    source,
                })?;
        ctx.put(object, key, value);
        Ok(())
    }

    /// Reconstructs the minimal entry values that reproduce the object's
    /// current state for this fact.
    ///
    /// Emission order is part of the contract: the clear sentinel first if
    /// the slot was explicitly cleared, then the stored value's original
    /// unconverted text. An untouched fact emits nothing. A consumer can
    /// therefore read inherited / cleared / cleared-then-reset / set
    /// directly off the returned sequence.
    pub fn unparse(&self, ctx: &dyn LoadContext, object: ObjectId) -> Vec<String> {
        let key = self.def.fact_key();
        let mut out = Vec::with_capacity(2);
        if ctx.was_explicitly_removed(object, key) {
            out.push(DOT_CLEAR.to_owned());
        }
        if let Some(value) = ctx.get(object, key) {
            out.push(value.unconverted().to_owned());
        }
        out
    }
}
