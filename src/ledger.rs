//! Append-only, resettable measurement store for one experiment track.

use serde::Serialize;

/// Ordered record store. Insertion order is preserved and meaningful:
/// trend lines and tables read records in the order they were taken.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger<T> {
    records: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to the stored copy.
    pub fn push(&mut self, record: T) -> &T {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a, T> IntoIterator for &'a Ledger<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut ledger = Ledger::new();
        ledger.push(3);
        ledger.push(1);
        let stored = *ledger.push(2);

        assert_eq!(stored, 2);
        assert_eq!(ledger.records(), &[3, 1, 2]);
        assert_eq!(ledger.last(), Some(&2));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_clear_empties_ledger() {
        let mut ledger: Ledger<&str> = Ledger::new();
        ledger.push("a");
        ledger.clear();

        assert!(ledger.is_empty());
        assert!(ledger.last().is_none());
        ledger.push("b");
        assert_eq!(ledger.records(), &["b"]);
    }
}
