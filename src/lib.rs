//! Rental Desk Library
//! # Overview
//!
//! Record keeping for a small vehicle-rental office: staff accounts, a vehicle
//! catalog and rental agreements, each persisted in its own CSV file.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (StaffAccount, Vehicle, RentalAgreement, etc.)
//! - [`io`] - CSV row format and the CSV-backed record store
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - `Record` / `RecordStore` abstractions
//!   - [`core::lifecycle`] - Rental creation, returns and history edits
//!   - [`core::accounts`] - Registration, login and sessions
//!   - [`core::catalog`] - Vehicle search, filtering and sorting
//!   - [`core::fee`] - Fee computation
//! - [`config`] - Configuration file handling
//! - [`office`] - The three collections opened from configuration
//! - [`cli`] - Command-line presentation layer
//!
//! # Rental Lifecycle
//!
//! - **Create**: an available vehicle is rented; a `Rented` agreement is
//!   written and the vehicle becomes unavailable
//! - **Return**: editing an agreement to `Returned` makes its vehicle available
//! - **Correction**: editing a `Returned` agreement back to `Rented` makes the
//!   vehicle unavailable again
//! - **Catalog status change**: making a vehicle available while it has open
//!   agreements requires operator confirmation
//!
//! # Persistence
//!
//! Every write regenerates the whole collection file and atomically replaces
//! the previous one.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod office;
pub mod types;

pub use crate::core::{
    AccountDirectory, CatalogQuery, MemoryStore, Record, RecordStore, RentalController,
    RentalEdit, RentalRequest, Session,
};
pub use config::Config;
pub use io::CsvStore;
pub use office::Office;
pub use types::{
    AvailabilityStatus, CustomerDetails, RentalAgreement, RentalError, RentalStatus, ReturnDate,
    StaffAccount, Vehicle,
};
