//! Core business logic module
//!
//! This module contains the record-keeping components:
//! - `traits` - `Record` and `RecordStore` abstractions
//! - `memory_store` - In-memory `RecordStore` implementation
//! - `accounts` - Staff registration, login and sessions
//! - `catalog` - Vehicle search, filtering, sorting and entry
//! - `fee` - Rental fee computation
//! - `lifecycle` - Rental lifecycle transitions across vehicles and agreements

pub mod accounts;
pub mod catalog;
pub mod fee;
pub mod lifecycle;
pub mod memory_store;
pub mod traits;

pub use accounts::{AccountDirectory, Session};
pub use catalog::{CatalogQuery, FeeSort};
pub use fee::FeeQuote;
pub use lifecycle::{
    AvailabilityChange, HistoryEntry, RentalController, RentalEdit, RentalRequest, RentalUpdate,
    VehicleTransition,
};
pub use memory_store::MemoryStore;
pub use traits::{Record, RecordStore};
