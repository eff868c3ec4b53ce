//! Original-key to transformed-key mapping.

use crate::error::RemapError;
use std::collections::HashMap;
use workload_types::OperationKind;

/// Mapping built while inserts are processed and consulted by every other operation.
///
/// Owned by a single workload run and dropped with it.
#[derive(Debug, Clone)]
pub struct KeyMapping<V> {
    entries: HashMap<u64, V>,
}

impl<V> Default for KeyMapping<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> KeyMapping<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value for `key`. A later insert of the same key replaces it.
    pub fn assign(&mut self, key: u64, value: V) {
        self.entries.insert(key, value);
    }

    /// Look up `key` on behalf of an operation of `kind`.
    pub fn resolve(&self, kind: OperationKind, key: u64) -> Result<&V, RemapError> {
        self.entries
            .get(&key)
            .ok_or(RemapError::UnmappedKey { kind, key })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_resolve() {
        let mut mapping = KeyMapping::new();
        assert!(mapping.is_empty());

        mapping.assign(7, 0u64);
        mapping.assign(42, 1u64);
        assert_eq!(mapping.len(), 2);
        assert_eq!(*mapping.resolve(OperationKind::Read, 7).unwrap(), 0);
        assert_eq!(*mapping.resolve(OperationKind::Scan, 42).unwrap(), 1);
    }

    #[test]
    fn test_reassign_replaces() {
        let mut mapping = KeyMapping::new();
        mapping.assign(7, "first".to_string());
        mapping.assign(7, "second".to_string());
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.resolve(OperationKind::Update, 7).unwrap(), "second");
    }

    #[test]
    fn test_unmapped_key() {
        let mapping: KeyMapping<u64> = KeyMapping::new();
        let err = mapping.resolve(OperationKind::Update, 5).unwrap_err();
        assert!(matches!(
            err,
            RemapError::UnmappedKey {
                kind: OperationKind::Update,
                key: 5
            }
        ));
        assert_eq!(err.to_string(), "UPDATE references key 5 which was never inserted");
    }
}
