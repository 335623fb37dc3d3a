//! I/O module
//!
//! Handles the CSV collection files.
//!
//! # Components
//!
//! - `csv_format` - Row structures, headers and record conversion
//! - `csv_store` - `RecordStore` implementation over one CSV file

pub mod csv_format;
pub mod csv_store;

pub use csv_format::{AccountRow, RentalRow, VehicleRow};
pub use csv_store::CsvStore;
