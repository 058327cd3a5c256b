//! Generic fact definition and token-parsing engine.
//!
//! `facts-core` lets schema data declare an arbitrary named, typed attribute
//! (a "Fact") for a class of game objects and automatically gain a working
//! text-format parser and serializer for it. Declaring a fact produces a
//! [`FactDefinition`]; handing that definition to [`FactToken::new`] yields
//! the parser/serializer pair the data-file tokenizer routes entries to.
//! No fact-specific code is written anywhere.
//!
//! The crate is pure: no I/O, no blocking, no async. File loading and
//! per-object storage live in `facts-content`; tokens reach storage only
//! through the [`LoadContext`] trait.
pub mod context;
pub mod definition;
pub mod error;
pub mod format;
pub mod object;
pub mod registry;
pub mod token;

pub use context::{LoadContext, MemoryContext};
pub use definition::{DefinitionError, FactDefinition, FactKey};
pub use error::{ErrorSeverity, FactError};
pub use format::{
    FactValue, FormatError, FormatKind, IndirectValue, ReferenceResolver, ResolveError,
    ValueFormat,
};
pub use object::{ObjectId, ObjectKind};
pub use registry::{DuplicateFactError, FactRegistry};
pub use token::{FactToken, ParseError};

/// Reserved literal meaning "explicitly remove any inherited or previous
/// value for this fact". Recognized before any format conversion runs and
/// rejected as a legal literal by every format.
pub const DOT_CLEAR: &str = ".CLEAR";
