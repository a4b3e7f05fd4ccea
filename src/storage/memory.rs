//! In-memory versioned object store. For testing and single-process hosts.

use crate::{error::CommitError, host::ObjectId};
use dashmap::DashMap;

/// An object snapshot paired with the store version it was taken at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The object state.
    pub value: T,
    /// The version this snapshot reflects.
    pub version: u64,
}

/// [`DashMap`]-backed store with optimistic concurrency per object.
///
/// `checkout` hands out an owned snapshot; `commit` only lands if nothing
/// else committed since that snapshot's version. Deleting corresponds to
/// the host's destroy-with-storage-refund path.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    objects: DashMap<ObjectId, Versioned<T>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self { objects: DashMap::new() }
    }
}

impl<T: Clone> InMemoryStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new shared object at version zero.
    pub fn share(&self, id: ObjectId, value: T) {
        self.objects.insert(id, Versioned { value, version: 0 });
    }

    /// Takes an owned snapshot of an object.
    pub fn checkout(&self, id: ObjectId) -> Result<Versioned<T>, CommitError> {
        self.objects.get(&id).map(|v| v.clone()).ok_or(CommitError::UnknownObject(id))
    }

    /// Commits a mutation built against `expected_version`.
    ///
    /// Returns the new version on success. A transaction that lost the race
    /// gets [`CommitError::VersionConflict`] and must re-checkout; its
    /// writes are simply discarded, mirroring the host's all-or-nothing
    /// abort.
    pub fn commit(&self, id: ObjectId, expected_version: u64, value: T) -> Result<u64, CommitError> {
        let mut entry = match self.objects.get_mut(&id) {
            Some(entry) => entry,
            None => return Err(CommitError::UnknownObject(id)),
        };
        if entry.version != expected_version {
            return Err(CommitError::VersionConflict {
                expected: expected_version,
                actual: entry.version,
            });
        }
        entry.value = value;
        entry.version += 1;
        Ok(entry.version)
    }

    /// Removes an object, returning its final state.
    pub fn delete(&self, id: ObjectId) -> Option<T> {
        self.objects.remove(&id).map(|(_, v)| v.value)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
