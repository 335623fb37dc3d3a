//! CSV format handling for the three collections
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for serialization and deserialization
//! - `Record` implementations converting rows to domain types and back
//! - The canonical column headers
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::traits::Record;
use crate::types::{
    parse_date, CustomerDetails, RentalAgreement, RentalError, RentalStatus, ReturnDate,
    StaffAccount, Vehicle, DATE_FORMAT,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ACCOUNT_HEADER: &[&str] = &["username", "password"];

pub const VEHICLE_HEADER: &[&str] = &[
    "vehicle_id",
    "type",
    "make",
    "model",
    "year",
    "daily_rate",
    "image_path",
    "is_available",
];

pub const RENTAL_HEADER: &[&str] = &[
    "rental_id",
    "vehicle_id",
    "customer_id",
    "customer_name",
    "customer_address",
    "customer_tel",
    "rent_date",
    "proposed_return_date",
    "actual_return_date",
    "status",
];

/// Literal stored for an available vehicle; anything else reads back as rented
const AVAILABLE_TEXT: &str = "True";
const UNAVAILABLE_TEXT: &str = "False";

/// Row of the accounts file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountRow {
    pub username: String,
    pub password: String,
}

/// Row of the vehicles file
///
/// Numeric columns are kept as text so that a malformed value is reported with
/// the field name instead of a generic deserialization error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VehicleRow {
    pub vehicle_id: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub daily_rate: String,
    pub image_path: String,
    pub is_available: String,
}

/// Row of the rentals file
///
/// Older files may lack the last two columns; they default to "not returned"
/// and "Rented".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RentalRow {
    pub rental_id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_tel: String,
    pub rent_date: String,
    pub proposed_return_date: String,
    #[serde(default)]
    pub actual_return_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Record for StaffAccount {
    type Row = AccountRow;

    const COLLECTION: &'static str = "accounts";
    const HEADER: &'static [&'static str] = ACCOUNT_HEADER;

    fn key(&self) -> &str {
        self.username()
    }

    fn to_record(&self) -> AccountRow {
        AccountRow {
            username: self.username().to_string(),
            password: self.password().to_string(),
        }
    }

    fn from_record(row: AccountRow) -> Result<Self, RentalError> {
        StaffAccount::new(&row.username, &row.password)
    }
}

impl Record for Vehicle {
    type Row = VehicleRow;

    const COLLECTION: &'static str = "vehicles";
    const HEADER: &'static [&'static str] = VEHICLE_HEADER;

    fn key(&self) -> &str {
        self.vehicle_id()
    }

    fn to_record(&self) -> VehicleRow {
        VehicleRow {
            vehicle_id: self.vehicle_id().to_string(),
            vehicle_type: self.vehicle_type().to_string(),
            make: self.make().to_string(),
            model: self.model().to_string(),
            year: self.year().to_string(),
            daily_rate: self.daily_rate().to_string(),
            image_path: self.image_path().to_string(),
            is_available: if self.is_available() {
                AVAILABLE_TEXT
            } else {
                UNAVAILABLE_TEXT
            }
            .to_string(),
        }
    }

    fn from_record(row: VehicleRow) -> Result<Self, RentalError> {
        let year = row
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| RentalError::invalid_value("year", &row.year))?;

        let daily_rate = Decimal::from_str(row.daily_rate.trim())
            .map_err(|_| RentalError::invalid_value("daily_rate", &row.daily_rate))?;

        Vehicle::new(
            &row.vehicle_id,
            &row.vehicle_type,
            &row.make,
            &row.model,
            year,
            daily_rate,
            &row.image_path,
            row.is_available == AVAILABLE_TEXT,
        )
    }
}

impl Record for RentalAgreement {
    type Row = RentalRow;

    const COLLECTION: &'static str = "rentals";
    const HEADER: &'static [&'static str] = RENTAL_HEADER;

    fn key(&self) -> &str {
        self.rental_id()
    }

    fn to_record(&self) -> RentalRow {
        let customer = self.customer();
        RentalRow {
            rental_id: self.rental_id().to_string(),
            vehicle_id: self.vehicle_id().to_string(),
            customer_id: customer.id().to_string(),
            customer_name: customer.name().to_string(),
            customer_address: customer.address().to_string(),
            customer_tel: customer.tel().to_string(),
            rent_date: self.rent_date().format(DATE_FORMAT).to_string(),
            proposed_return_date: self.proposed_return_date().format(DATE_FORMAT).to_string(),
            actual_return_date: Some(self.actual_return_date().to_string()),
            status: Some(self.status().to_string()),
        }
    }

    fn from_record(row: RentalRow) -> Result<Self, RentalError> {
        let customer = CustomerDetails::restore(
            &row.customer_id,
            &row.customer_name,
            &row.customer_address,
            &row.customer_tel,
        );

        let actual_return_date = match row.actual_return_date {
            Some(text) => text.parse::<ReturnDate>()?,
            None => ReturnDate::NotReturned,
        };

        let status = match row.status {
            Some(text) if !text.trim().is_empty() => text.parse::<RentalStatus>()?,
            _ => RentalStatus::Rented,
        };

        Ok(RentalAgreement::restore(
            &row.rental_id,
            &row.vehicle_id,
            customer,
            parse_date("rent_date", &row.rent_date)?,
            parse_date("proposed_return_date", &row.proposed_return_date)?,
            actual_return_date,
            status,
        ))
    }
}
