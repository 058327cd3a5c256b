//! Object handles and object-kind names.
//!
//! Facts attach to object *instances* identified by an opaque handle; which
//! facts may attach is decided by the instance's *kind* (the class of game
//! object declared in the schema, e.g. `CREATURE` or `SKILL`).

use std::fmt;

/// Unique identifier for an object instance tracked during a load pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Case-normalized name for a class of game objects.
///
/// Kinds are declared by schema data, not by a closed enum, so two kinds are
/// equal when their names match after normalization. `ObjectKind::new("Creature")`
/// and `ObjectKind::new("CREATURE")` denote the same kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectKind(String);

impl ObjectKind {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the normalized (uppercase) kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_compare_case_insensitively() {
        assert_eq!(ObjectKind::new("Creature"), ObjectKind::new("CREATURE"));
        assert_eq!(ObjectKind::new(" creature "), ObjectKind::new("CREATURE"));
        assert_ne!(ObjectKind::new("CREATURE"), ObjectKind::new("SKILL"));
    }

    #[test]
    fn object_ids_display_as_handles() {
        assert_eq!(ObjectId(7).to_string(), "#7");
    }
}
