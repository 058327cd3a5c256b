//! Object store: named objects plus their fact slots.
//!
//! Data files refer to objects by (kind, name); the store interns each pair
//! to an [`ObjectId`] and owns the per-object fact storage behind the
//! [`LoadContext`] trait. It also implements [`ReferenceResolver`] over its
//! name index, so deferred reference values resolve once every file has
//! loaded.

use std::collections::HashMap;

use facts_core::{
    FactKey, IndirectValue, LoadContext, MemoryContext, ObjectId, ObjectKind, ReferenceResolver,
};

#[derive(Clone, Debug)]
struct ObjectRecord {
    kind: ObjectKind,
    /// Name as first seen in a data file, for serialization.
    name: String,
}

/// In-memory table of loaded objects and their facts.
#[derive(Clone, Debug, Default)]
pub struct ObjectStore {
    ctx: MemoryContext,
    records: Vec<ObjectRecord>,
    // Normalized (kind, uppercase name) -> id.
    index: HashMap<(ObjectKind, String), ObjectId>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the object named in a data file, creating it on first sight.
    pub fn intern(&mut self, kind: &ObjectKind, name: &str) -> ObjectId {
        let slot = (kind.clone(), name.trim().to_ascii_uppercase());
        if let Some(id) = self.index.get(&slot) {
            return *id;
        }
        let id = ObjectId(self.records.len() as u32);
        self.records.push(ObjectRecord {
            kind: kind.clone(),
            name: name.trim().to_owned(),
        });
        self.index.insert(slot, id);
        id
    }

    /// Looks up an already-interned object without creating it.
    pub fn lookup(&self, kind: &ObjectKind, name: &str) -> Option<ObjectId> {
        self.index
            .get(&(kind.clone(), name.trim().to_ascii_uppercase()))
            .copied()
    }

    /// The name the object was first loaded under.
    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.records.get(id.0 as usize).map(|r| r.name.as_str())
    }

    pub fn kind(&self, id: ObjectId) -> Option<&ObjectKind> {
        self.records.get(id.0 as usize).map(|r| &r.kind)
    }

    /// Objects of the given kind, in load order.
    pub fn objects_of(&self, kind: &ObjectKind) -> impl Iterator<Item = ObjectId> + '_ {
        let kind = kind.clone();
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.kind == kind)
            .map(|(i, _)| ObjectId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LoadContext for ObjectStore {
    fn put(&mut self, object: ObjectId, key: FactKey, value: IndirectValue) {
        self.ctx.put(object, key, value);
    }

    fn remove(&mut self, object: ObjectId, key: FactKey) {
        self.ctx.remove(object, key);
    }

    fn get(&self, object: ObjectId, key: FactKey) -> Option<&IndirectValue> {
        self.ctx.get(object, key)
    }

    fn was_explicitly_removed(&self, object: ObjectId, key: FactKey) -> bool {
        self.ctx.was_explicitly_removed(object, key)
    }
}

impl ReferenceResolver for ObjectStore {
    fn resolve(&self, kind: &ObjectKind, key: &str) -> Option<ObjectId> {
        self.lookup(kind, key)
    }
}
