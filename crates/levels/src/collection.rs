//! Ordered record storage with derived indices
//!
//! Every structural change ends in a reindex so that a record's `index`
//! always equals its position.

use crate::records::{Indexed, Record};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct RecordList<T> {
    items: Vec<T>,
}

impl<T: Record + Indexed> RecordList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Append, assigning the record the next index
    pub fn push(&mut self, mut record: T) -> usize {
        let index = self.items.len();
        record.set_index(index);
        self.items.push(record);
        index
    }

    /// Remove the record at `index`; out-of-range indices are ignored
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.reindex_from(index);
        Some(removed)
    }

    /// Remove the tail record, if any
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Stable sort by `key`, then reindex
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&T) -> K) {
        self.items.sort_by_key(key);
        self.reindex_from(0);
    }

    /// Raw access for structural edits; the caller must call [`Self::reindex_from`]
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn reindex_from(&mut self, start: usize) {
        for (position, record) in self.items.iter_mut().enumerate().skip(start) {
            record.set_index(position);
        }
    }
}

impl<T: Record + Indexed> Default for RecordList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::GravityChange;

    fn list_of(xs: &[i32]) -> RecordList<GravityChange> {
        let mut list = RecordList::new();
        for &x in xs {
            list.push(GravityChange::new(x));
        }
        list
    }

    fn assert_indices_match_positions(list: &RecordList<GravityChange>) {
        for (position, record) in list.as_slice().iter().enumerate() {
            assert_eq!(record.index(), position);
        }
    }

    #[test]
    fn test_push_assigns_indices() {
        let list = list_of(&[10, 20, 30]);
        assert_eq!(list.len(), 3);
        assert_indices_match_positions(&list);
    }

    #[test]
    fn test_remove_at_reindexes_every_position() {
        for n in 1..6 {
            for i in 0..n {
                let xs: Vec<i32> = (0..n as i32).collect();
                let mut list = list_of(&xs);
                let removed = list.remove_at(i).unwrap();
                assert_eq!(removed.x, i as i32);
                assert_eq!(list.len(), n - 1);
                assert_indices_match_positions(&list);
            }
        }
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = list_of(&[1, 2]);
        assert!(list.remove_at(2).is_none());
        assert!(list.remove_at(usize::MAX).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_pop_on_empty() {
        let mut list: RecordList<GravityChange> = RecordList::new();
        assert!(list.pop().is_none());
        let mut list = list_of(&[5, 6]);
        assert_eq!(list.pop().map(|g| g.x), Some(6));
        assert_indices_match_positions(&list);
    }

    #[test]
    fn test_sort_is_stable_and_reindexes() {
        let mut list = list_of(&[30, 10, 20]);
        list.sort_by_key(|g| g.x);
        let xs: Vec<i32> = list.as_slice().iter().map(|g| g.x).collect();
        assert_eq!(xs, [10, 20, 30]);
        assert_indices_match_positions(&list);
    }
}
