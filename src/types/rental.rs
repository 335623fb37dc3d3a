//! Rental agreement types
//!
//! This module defines the rental agreement record together with its status,
//! the customer details it carries, and the actual-return date which is either
//! a calendar date or "not yet returned".

use super::error::RentalError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Calendar date format used everywhere in the rental files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored text for an agreement that has not been returned yet
pub const NOT_RETURNED: &str = "N/A";

/// Parse a `YYYY-MM-DD` date, reporting failures against `field`
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate, RentalError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        RentalError::validation(field, &format!("'{}' is not a YYYY-MM-DD date", text))
    })
}

/// Rental lifecycle state
///
/// `Rented` is the initial state, `Returned` the terminal one. The history
/// editor may still force `Returned -> Rented` as a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    Rented,
    Returned,
}

impl FromStr for RentalStatus {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rented" => Ok(RentalStatus::Rented),
            "returned" => Ok(RentalStatus::Returned),
            _ => Err(RentalError::invalid_value("status", s)),
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalStatus::Rented => write!(f, "Rented"),
            RentalStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// Actual return date of an agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnDate {
    NotReturned,
    ReturnedOn(NaiveDate),
}

impl FromStr for ReturnDate {
    type Err = RentalError;

    /// `N/A` (any case) and the empty string both mean "not returned"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(NOT_RETURNED) {
            return Ok(ReturnDate::NotReturned);
        }
        parse_date("actual_return_date", s).map(ReturnDate::ReturnedOn)
    }
}

impl fmt::Display for ReturnDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnDate::NotReturned => write!(f, "{}", NOT_RETURNED),
            ReturnDate::ReturnedOn(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

/// Customer fields captured on an agreement
///
/// All four fields are required when details are entered; `new` trims
/// surrounding whitespace. Stored agreements are read back with `restore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    id: String,
    name: String,
    address: String,
    tel: String,
}

impl CustomerDetails {
    pub fn new(id: &str, name: &str, address: &str, tel: &str) -> Result<Self, RentalError> {
        let fields = [
            ("customer_id", id),
            ("customer_name", name),
            ("customer_address", address),
            ("customer_tel", tel),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(RentalError::required(field));
            }
        }

        Ok(CustomerDetails {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            tel: tel.trim().to_string(),
        })
    }

    /// Rebuild details from a stored agreement, exactly as stored
    pub fn restore(id: &str, name: &str, address: &str, tel: &str) -> Self {
        CustomerDetails {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            tel: tel.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn tel(&self) -> &str {
        &self.tel
    }
}

/// A rental agreement between the office and a walk-in customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalAgreement {
    rental_id: String,
    vehicle_id: String,
    customer: CustomerDetails,
    rent_date: NaiveDate,
    proposed_return_date: NaiveDate,
    actual_return_date: ReturnDate,
    status: RentalStatus,
}

impl RentalAgreement {
    /// Open a new agreement (status `Rented`, not yet returned)
    pub fn open(
        rental_id: &str,
        vehicle_id: &str,
        customer: CustomerDetails,
        rent_date: NaiveDate,
        proposed_return_date: NaiveDate,
    ) -> Self {
        Self::restore(
            rental_id,
            vehicle_id,
            customer,
            rent_date,
            proposed_return_date,
            ReturnDate::NotReturned,
            RentalStatus::Rented,
        )
    }

    /// Rebuild an agreement in any state (used when loading stored rows)
    pub fn restore(
        rental_id: &str,
        vehicle_id: &str,
        customer: CustomerDetails,
        rent_date: NaiveDate,
        proposed_return_date: NaiveDate,
        actual_return_date: ReturnDate,
        status: RentalStatus,
    ) -> Self {
        RentalAgreement {
            rental_id: rental_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            customer,
            rent_date,
            proposed_return_date,
            actual_return_date,
            status,
        }
    }

    pub fn rental_id(&self) -> &str {
        &self.rental_id
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn rent_date(&self) -> NaiveDate {
        self.rent_date
    }

    pub fn proposed_return_date(&self) -> NaiveDate {
        self.proposed_return_date
    }

    pub fn actual_return_date(&self) -> ReturnDate {
        self.actual_return_date
    }

    pub fn status(&self) -> RentalStatus {
        self.status
    }

    /// True while the agreement is still `Rented`
    pub fn is_open(&self) -> bool {
        self.status == RentalStatus::Rented
    }

    pub fn set_customer(&mut self, customer: CustomerDetails) {
        self.customer = customer;
    }

    pub fn set_rent_date(&mut self, date: NaiveDate) {
        self.rent_date = date;
    }

    pub fn set_proposed_return_date(&mut self, date: NaiveDate) {
        self.proposed_return_date = date;
    }

    pub fn set_actual_return_date(&mut self, date: ReturnDate) {
        self.actual_return_date = date;
    }

    pub fn set_status(&mut self, status: RentalStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_open_agreement_defaults() {
        let customer = CustomerDetails::new("C1", "Nimal", "Colombo", "0771234567").unwrap();
        let rental = RentalAgreement::open("R1", "V1", customer, date("2025-01-01"), date("2025-01-04"));

        assert_eq!(rental.status(), RentalStatus::Rented);
        assert_eq!(rental.actual_return_date(), ReturnDate::NotReturned);
        assert!(rental.is_open());
    }

    #[rstest]
    #[case::empty_id("", "n", "a", "t", "customer_id")]
    #[case::empty_name("i", "", "a", "t", "customer_name")]
    #[case::blank_address("i", "n", "   ", "t", "customer_address")]
    #[case::empty_tel("i", "n", "a", "", "customer_tel")]
    fn test_customer_requires_every_field(
        #[case] id: &str,
        #[case] name: &str,
        #[case] address: &str,
        #[case] tel: &str,
        #[case] field: &str,
    ) {
        let err = CustomerDetails::new(id, name, address, tel).unwrap_err();
        assert_eq!(err, RentalError::required(field));
    }

    #[test]
    fn test_customer_trims_fields() {
        let customer = CustomerDetails::new(" C1 ", "Nimal ", " Kandy", "077 ").unwrap();
        assert_eq!(customer.id(), "C1");
        assert_eq!(customer.name(), "Nimal");
        assert_eq!(customer.address(), "Kandy");
        assert_eq!(customer.tel(), "077");
    }

    #[test]
    fn test_customer_restore_keeps_stored_text() {
        let customer = CustomerDetails::restore("C1", " Nimal", "Colombo", "");
        assert_eq!(customer.name(), " Nimal");
        assert_eq!(customer.tel(), "");
    }

    #[rstest]
    #[case("N/A", ReturnDate::NotReturned)]
    #[case("n/a", ReturnDate::NotReturned)]
    #[case("", ReturnDate::NotReturned)]
    #[case("2025-02-03", ReturnDate::ReturnedOn(date("2025-02-03")))]
    fn test_return_date_parse(#[case] input: &str, #[case] expected: ReturnDate) {
        assert_eq!(input.parse::<ReturnDate>().unwrap(), expected);
    }

    #[test]
    fn test_return_date_rejects_garbage() {
        let err = "03/02/2025".parse::<ReturnDate>().unwrap_err();
        assert!(matches!(err, RentalError::Validation { .. }));
    }

    #[test]
    fn test_return_date_display() {
        assert_eq!(ReturnDate::NotReturned.to_string(), "N/A");
        assert_eq!(
            ReturnDate::ReturnedOn(date("2025-01-09")).to_string(),
            "2025-01-09"
        );
    }

    #[rstest]
    #[case("Rented", RentalStatus::Rented)]
    #[case("returned", RentalStatus::Returned)]
    fn test_status_parse(#[case] input: &str, #[case] expected: RentalStatus) {
        assert_eq!(input.parse::<RentalStatus>().unwrap(), expected);
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(matches!(
            "Lost".parse::<RentalStatus>(),
            Err(RentalError::InvalidValue { .. })
        ));
    }

    #[rstest]
    #[case("2025-07-26", true)]
    #[case("2025-02-30", false)]
    #[case("26-07-2025", false)]
    #[case("", false)]
    fn test_parse_date(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(parse_date("rent_date", input).is_ok(), ok);
    }
}
