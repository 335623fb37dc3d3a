//! Core traits for records and record stores
//!
//! This module defines the trait abstractions that let the lifecycle logic run
//! against any backing store. The CSV store and the in-memory store implement
//! the same `RecordStore` contract and can be used interchangeably.

use crate::types::RentalError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persistable entity with an identity key
///
/// `to_record` and `from_record` convert between the entity and its flat row
/// representation; the pair must round-trip every field.
pub trait Record: Clone {
    /// Flat row representation written to and read from a collection file
    type Row: Serialize + DeserializeOwned;

    /// Collection name used in errors and logs
    const COLLECTION: &'static str;

    /// Canonical column header, in storage order
    const HEADER: &'static [&'static str];

    /// Identity key (username, vehicle id, rental id)
    fn key(&self) -> &str;

    /// Export the entity as a row
    fn to_record(&self) -> Self::Row;

    /// Import an entity from a row
    fn from_record(row: Self::Row) -> Result<Self, RentalError>;
}

/// Trait for whole-collection record storage
///
/// Every mutation is load -> modify -> full rewrite. This is O(n) per write and
/// sized for collections of a few hundred rows.
pub trait RecordStore<T: Record> {
    /// Create the backing storage with its header if it does not exist yet
    fn ensure_initialized(&self) -> Result<(), RentalError>;

    /// Load every record; a store that was never initialized is empty
    fn load_all(&self) -> Result<Vec<T>, RentalError>;

    /// Replace the whole collection with `records`
    fn rewrite_all(&self, records: &[T]) -> Result<(), RentalError>;

    /// Append a record without any uniqueness check
    fn append(&self, record: T) -> Result<(), RentalError> {
        let mut records = self.load_all()?;
        records.push(record);
        self.rewrite_all(&records)
    }

    /// Append a record unless its key is already present
    ///
    /// Returns `Ok(false)` and writes nothing for a duplicate key.
    fn append_unique(&self, record: T) -> Result<bool, RentalError> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.key() == record.key()) {
            return Ok(false);
        }
        records.push(record);
        self.rewrite_all(&records)?;
        Ok(true)
    }

    /// Replace the first record whose key matches `record`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` and writes nothing when no record matches.
    fn update_by_key(&self, record: &T) -> Result<(), RentalError> {
        let mut records = self.load_all()?;
        let slot = records
            .iter_mut()
            .find(|r| r.key() == record.key())
            .ok_or_else(|| RentalError::not_found(T::COLLECTION, record.key()))?;
        *slot = record.clone();
        self.rewrite_all(&records)
    }

    /// Linear lookup by identity key
    fn find_by_key(&self, key: &str) -> Result<Option<T>, RentalError> {
        Ok(self.load_all()?.into_iter().find(|r| r.key() == key))
    }
}
