//! Cache Entry Module
//!
//! Defines the key/value pair stored in each recency list slot.

use crate::cache::Value;

// == Cache Entry ==
/// A single live key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The lookup key
    pub key: String,
    /// The stored value
    pub value: V,
}

impl<V: Value> Entry<V> {
    // == Constructor ==
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    // == Size ==
    /// Returns the accounted footprint: key byte length plus value size.
    /// Saturates at `usize::MAX`.
    pub fn size(&self) -> usize {
        self.key.len().saturating_add(self.value.size())
    }

    /// Splits the entry into its owned key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    struct Huge;

    impl Value for Huge {
        fn size(&self) -> usize {
            usize::MAX
        }
    }

    #[test]
    fn test_entry_size_counts_key_and_value() {
        let entry = Entry::new("key1".to_string(), "123456".to_string());
        assert_eq!(entry.size(), 10);
    }

    #[test]
    fn test_entry_size_empty_key_and_value() {
        let entry = Entry::new(String::new(), String::new());
        assert_eq!(entry.size(), 0);
    }

    #[test]
    fn test_entry_size_saturates() {
        let entry = Entry::new("key".to_string(), Huge);
        assert_eq!(entry.size(), usize::MAX);
    }

    #[test]
    fn test_entry_into_parts() {
        let entry = Entry::new("k".to_string(), vec![1u8, 2]);
        assert_eq!(entry.into_parts(), ("k".to_string(), vec![1u8, 2]));
    }
}
