//! The load-context seam between tokens and per-object storage.
//!
//! Tokens never own fact storage. During a parse pass every read and write
//! of an object's fact slots is mediated by a [`LoadContext`], which the
//! host supplies; [`MemoryContext`] is the in-memory reference
//! implementation used by the file loader and by tests.

use std::collections::{HashMap, HashSet};

use crate::definition::FactKey;
use crate::format::IndirectValue;
use crate::object::ObjectId;

/// Per-object fact storage as seen by tokens.
///
/// For each (object, key) slot the implementor holds at most one current
/// value plus a flag recording that the slot was explicitly cleared this
/// pass. Re-setting a cleared slot must keep the cleared flag: unparse
/// relies on it to distinguish cleared-then-reset from plainly set.
///
/// The engine assumes at most one concurrent writer per object; providing
/// that guarantee is the host's job.
pub trait LoadContext {
    /// Stores a value, overwriting any prior value for this pass.
    fn put(&mut self, object: ObjectId, key: FactKey, value: IndirectValue);

    /// Removes any current value and records that the clear was explicit.
    fn remove(&mut self, object: ObjectId, key: FactKey);

    /// Returns the current value, if one is set.
    fn get(&self, object: ObjectId, key: FactKey) -> Option<&IndirectValue>;

    /// Returns true if the slot was explicitly cleared during this pass.
    fn was_explicitly_removed(&self, object: ObjectId, key: FactKey) -> bool;
}

/// Hash-map backed [`LoadContext`].
#[derive(Clone, Debug, Default)]
pub struct MemoryContext {
    values: HashMap<(ObjectId, FactKey), IndirectValue>,
    cleared: HashSet<(ObjectId, FactKey)>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoadContext for MemoryContext {
    fn put(&mut self, object: ObjectId, key: FactKey, value: IndirectValue) {
        self.values.insert((object, key), value);
    }

    fn remove(&mut self, object: ObjectId, key: FactKey) {
        self.values.remove(&(object, key));
        self.cleared.insert((object, key));
    }

    fn get(&self, object: ObjectId, key: FactKey) -> Option<&IndirectValue> {
        self.values.get(&(object, key))
    }

    fn was_explicitly_removed(&self, object: ObjectId, key: FactKey) -> bool {
        self.cleared.contains(&(object, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatKind, ValueFormat};

    fn value(text: &str) -> IndirectValue {
        ValueFormat::Text.convert(text).unwrap()
    }

    #[test]
    fn slot_lifecycle() {
        let mut ctx = MemoryContext::new();
        let obj = ObjectId(1);
        let key = FactKey::allocate(FormatKind::Text);

        // Absent.
        assert!(ctx.get(obj, key).is_none());
        assert!(!ctx.was_explicitly_removed(obj, key));

        // Set.
        ctx.put(obj, key, value("alpha"));
        assert_eq!(ctx.get(obj, key).unwrap().unconverted(), "alpha");

        // Cleared.
        ctx.remove(obj, key);
        assert!(ctx.get(obj, key).is_none());
        assert!(ctx.was_explicitly_removed(obj, key));

        // Set again: cleared flag survives.
        ctx.put(obj, key, value("beta"));
        assert_eq!(ctx.get(obj, key).unwrap().unconverted(), "beta");
        assert!(ctx.was_explicitly_removed(obj, key));
    }

    #[test]
    fn slots_are_keyed_by_identity() {
        let mut ctx = MemoryContext::new();
        let obj = ObjectId(1);
        let a = FactKey::allocate(FormatKind::Text);
        let b = FactKey::allocate(FormatKind::Text);

        ctx.put(obj, a, value("for-a"));
        assert!(ctx.get(obj, b).is_none());
        ctx.remove(obj, b);
        assert!(!ctx.was_explicitly_removed(obj, a));
    }
}
