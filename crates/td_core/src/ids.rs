//! Bidirectional label <-> dense integer ID allocation.
//!
//! Mirrors the `IDMapping` bidict used to build sources, variables, values,
//! and claims: insertion is monotone (the next ID is always the current
//! count), and every issued ID has a working inverse lookup.

use std::collections::HashMap;
use std::hash::Hash;

use crate::errors::CoreError;

/// A dense, insertion-ordered label <-> id table.
#[derive(Debug, Clone)]
pub struct IdTable<L> {
    labels: Vec<L>,
    index: HashMap<L, u32>,
}

impl<L> Default for IdTable<L> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<L: Eq + Hash + Clone> IdTable<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ID for `label`, allocating a new one (equal to the
    /// current count) if it has not been seen before.
    pub fn get_or_insert(&mut self, label: L) -> u32 {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.labels.len() as u32;
        self.labels.push(label.clone());
        self.index.insert(label, id);
        id
    }

    /// Look up the ID for `label` without inserting.
    pub fn get(&self, label: &L) -> Option<u32> {
        self.index.get(label).copied()
    }

    /// Look up the ID for `label`, failing with `UnknownLabel` if absent.
    pub fn try_get(&self, label: &L) -> Result<u32, CoreError> {
        self.get(label).ok_or(CoreError::UnknownLabel)
    }

    pub fn label_of(&self, id: u32) -> Option<&L> {
        self.labels.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_is_dense_and_monotone() {
        let mut t: IdTable<&str> = IdTable::new();
        assert_eq!(t.get_or_insert("a"), 0);
        assert_eq!(t.get_or_insert("b"), 1);
        assert_eq!(t.get_or_insert("a"), 0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.label_of(0), Some(&"a"));
        assert_eq!(t.label_of(1), Some(&"b"));
    }

    #[test]
    fn missing_label_is_unknown() {
        let t: IdTable<&str> = IdTable::new();
        assert!(matches!(t.try_get(&"z"), Err(CoreError::UnknownLabel)));
    }
}
