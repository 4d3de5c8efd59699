//! Ordered in-memory collection of records keyed by an integer id.
//!
//! The collection assigns ids itself (`max + 1`, starting at 1), keeps records
//! in insertion order and applies partial updates as a sparse merge. It is a
//! plain owned value; callers that share it across tasks wrap it in a lock and
//! treat every mutating call as a critical section.

use crate::error::{Result, ShelfError};

pub type RecordId = i64;

/// A record that can live in a [`ResourceCollection`].
pub trait Record: Clone {
    /// Creation shape, everything except the id
    type Draft;
    /// Sparse update shape, every field optional
    type Patch;

    /// Label used in `NotFound` errors
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Apply only the fields present in `patch`. Must not change the id.
    fn merge(&mut self, patch: Self::Patch);
}

#[derive(Debug, Clone)]
pub struct ResourceCollection<T> {
    records: Vec<T>,
}

impl<T: Record> ResourceCollection<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// All records in current order
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new record with the next free id and return it
    pub fn create(&mut self, draft: T::Draft) -> T {
        let record = T::from_draft(self.next_id(), draft);
        self.records.push(record.clone());
        record
    }

    pub fn get(&self, id: RecordId) -> Result<&T> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| ShelfError::not_found(T::KIND, id))
    }

    /// Merge `patch` into the record with `id`, leaving it at its position
    pub fn update(&mut self, id: RecordId, patch: T::Patch) -> Result<T> {
        let pos = self.position(id)?;
        let record = &mut self.records[pos];
        record.merge(patch);
        debug_assert_eq!(record.id(), id);
        Ok(record.clone())
    }

    /// Remove the record with `id` and return it
    pub fn delete(&mut self, id: RecordId) -> Result<T> {
        let pos = self.position(id)?;
        Ok(self.records.remove(pos))
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ShelfError::not_found(T::KIND, id))
    }

    fn next_id(&self) -> RecordId {
        self.records
            .iter()
            .map(Record::id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

impl<T: Record> Default for ResourceCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: RecordId,
        title: String,
        pinned: bool,
    }

    #[derive(Default)]
    struct NotePatch {
        title: Option<String>,
        pinned: Option<bool>,
    }

    impl Record for Note {
        type Draft = &'static str;
        type Patch = NotePatch;
        const KIND: &'static str = "Note";

        fn id(&self) -> RecordId {
            self.id
        }

        fn from_draft(id: RecordId, title: &'static str) -> Self {
            Note {
                id,
                title: title.to_string(),
                pinned: false,
            }
        }

        fn merge(&mut self, patch: NotePatch) {
            if let Some(title) = patch.title {
                self.title = title;
            }
            if let Some(pinned) = patch.pinned {
                self.pinned = pinned;
            }
        }
    }

    fn ids(notes: &ResourceCollection<Note>) -> Vec<RecordId> {
        notes.list().iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        for title in ["a", "b", "c", "d", "e"] {
            notes.create(title);
        }
        assert_eq!(ids(&notes), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_create_then_get_returns_same_record() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        let created = notes.create("first");
        let fetched = assert_ok!(notes.get(created.id));
        assert_eq!(fetched, &created);
    }

    #[test]
    fn test_next_id_follows_current_max() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        notes.create("a");
        notes.create("b");
        notes.create("c");

        assert_ok!(notes.delete(3));
        assert_eq!(notes.create("d").id, 3);

        assert_ok!(notes.delete(1));
        assert_eq!(notes.create("e").id, 4);
        assert_eq!(ids(&notes), vec![2, 3, 4]);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        notes.create("a");
        notes.create("b");

        let updated = assert_ok!(notes.update(
            1,
            NotePatch {
                pinned: Some(true),
                ..Default::default()
            },
        ));
        assert_eq!(
            updated,
            Note {
                id: 1,
                title: "a".to_string(),
                pinned: true,
            }
        );
        // Position is kept
        assert_eq!(ids(&notes), vec![1, 2]);
        assert_eq!(assert_ok!(notes.get(1)), &updated);
    }

    #[test]
    fn test_update_missing_leaves_collection_unchanged() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        notes.create("a");
        let before = notes.list().to_vec();

        let err = assert_err!(notes.update(
            7,
            NotePatch {
                title: Some("x".to_string()),
                ..Default::default()
            },
        ));
        assert!(matches!(err, ShelfError::NotFound { kind: "Note", id: 7 }));
        assert_eq!(notes.list(), before.as_slice());
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        let a = notes.create("a");
        notes.create("b");

        let removed = assert_ok!(notes.delete(a.id));
        assert_eq!(removed, a);
        assert_err!(notes.get(a.id));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let mut notes: ResourceCollection<Note> = ResourceCollection::new();
        assert_err!(notes.delete(1));

        notes.create("a");
        let err = assert_err!(notes.delete(2));
        assert_eq!(err.to_string(), "Note not found: 2");
        assert_eq!(ids(&notes), vec![1]);
    }
}
