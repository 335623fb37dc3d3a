//! In-memory record store
//!
//! Holds a collection in a `RefCell<Vec<T>>` behind the same `RecordStore`
//! contract as the CSV store. Used where no file should be touched, such as
//! controller tests and dry runs.

use crate::core::traits::{Record, RecordStore};
use crate::types::RentalError;
use std::cell::RefCell;

#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RefCell<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            records: RefCell::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with `records`
    pub fn with_records(records: Vec<T>) -> Self {
        MemoryStore {
            records: RefCell::new(records),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> for MemoryStore<T> {
    fn ensure_initialized(&self) -> Result<(), RentalError> {
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<T>, RentalError> {
        Ok(self.records.borrow().clone())
    }

    fn rewrite_all(&self, records: &[T]) -> Result<(), RentalError> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StaffAccount;

    #[test]
    fn test_memory_store_follows_store_contract() {
        let store: MemoryStore<StaffAccount> = MemoryStore::new();
        let alice = StaffAccount::new("alice", "pw").unwrap();

        assert!(store.append_unique(alice.clone()).unwrap());
        assert!(!store.append_unique(alice.clone()).unwrap());
        assert_eq!(store.find_by_key("alice").unwrap(), Some(alice));
        assert_eq!(store.find_by_key("bob").unwrap(), None);
    }

    #[test]
    fn test_memory_store_update_missing() {
        let store: MemoryStore<StaffAccount> = MemoryStore::new();
        let bob = StaffAccount::new("bob", "pw").unwrap();

        assert!(matches!(
            store.update_by_key(&bob),
            Err(RentalError::NotFound { .. })
        ));
        assert!(store.load_all().unwrap().is_empty());
    }
}
