//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Staff account type
//! - `vehicle`: Vehicle catalog entry and availability status
//! - `rental`: Rental agreement, status, return date and customer details
//! - `error`: Error types for the rental desk

pub mod account;
pub mod error;
pub mod rental;
pub mod vehicle;

pub use account::StaffAccount;
pub use error::RentalError;
pub use rental::{
    parse_date, CustomerDetails, RentalAgreement, RentalStatus, ReturnDate, DATE_FORMAT,
    NOT_RETURNED,
};
pub use vehicle::{AvailabilityStatus, Vehicle};
