//! Vehicle catalog entry
//!
//! A vehicle is identified by its `vehicle_id`; everything except availability
//! is fixed once it enters the catalog.

use super::error::RentalError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A rentable vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    vehicle_id: String,
    vehicle_type: String,
    make: String,
    model: String,
    year: i32,
    daily_rate: Decimal,
    image_path: String,
    is_available: bool,
}

impl Vehicle {
    /// Create a new catalog entry
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the id is empty or the daily rate is
    /// negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vehicle_id: &str,
        vehicle_type: &str,
        make: &str,
        model: &str,
        year: i32,
        daily_rate: Decimal,
        image_path: &str,
        is_available: bool,
    ) -> Result<Self, RentalError> {
        if vehicle_id.is_empty() {
            return Err(RentalError::required("vehicle_id"));
        }
        if daily_rate < Decimal::ZERO {
            return Err(RentalError::validation(
                "daily_rate",
                "must not be negative",
            ));
        }

        Ok(Vehicle {
            vehicle_id: vehicle_id.to_string(),
            vehicle_type: vehicle_type.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            daily_rate,
            image_path: image_path.to_string(),
            is_available,
        })
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn set_available(&mut self, available: bool) {
        self.is_available = available;
    }

    /// "Make Model" label used in listings
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn status(&self) -> AvailabilityStatus {
        AvailabilityStatus::from(self.is_available)
    }
}

/// Operator-facing availability value
///
/// Parses the text an operator types or picks; anything other than
/// `Available`/`Rented` (case-insensitive) is rejected with `InvalidValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Rented,
}

impl AvailabilityStatus {
    pub fn is_available(self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }
}

impl From<bool> for AvailabilityStatus {
    fn from(available: bool) -> Self {
        if available {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::Rented
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "rented" => Ok(AvailabilityStatus::Rented),
            _ => Err(RentalError::invalid_value("availability", s)),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "Available"),
            AvailabilityStatus::Rented => write!(f, "Rented"),
        }
    }
}
