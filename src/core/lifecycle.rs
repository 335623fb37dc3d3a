//! Rental lifecycle controller
//!
//! This module moves vehicles between Available/Rented and agreements between
//! Rented/Returned, keeping the two collections in step.
//!
//! # Transitions
//!
//! - **Create rental**: available vehicle -> new `Rented` agreement, vehicle
//!   unavailable
//! - **Vehicle made available** while open agreements reference it: requires
//!   an operator confirmation, agreements are left untouched
//! - **Agreement Rented -> Returned** (history edit): vehicle becomes available
//!   without confirmation
//! - **Agreement Returned -> Rented** (history correction): vehicle becomes
//!   unavailable
//!
//! # Two-collection writes
//!
//! Every transition is applied by `apply_transition`, which writes the
//! agreement first and the vehicle second. There is no rollback: if the
//! vehicle write fails the agreement stays written, the failure is logged and
//! returned to the caller.

use crate::core::traits::{Record, RecordStore};
use crate::types::{
    parse_date, AvailabilityStatus, CustomerDetails, RentalAgreement, RentalError, RentalStatus,
    ReturnDate, Vehicle,
};
use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;

/// Label shown for agreements whose vehicle is no longer in the catalog
pub const UNKNOWN_VEHICLE: &str = "Unknown Vehicle";

/// Raw rental form as entered by an operator
#[derive(Debug, Clone, Default)]
pub struct RentalRequest {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_tel: String,
    pub rent_date: String,
    pub proposed_return_date: String,
}

/// Validated replacement values for an existing agreement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalEdit {
    pub customer: CustomerDetails,
    pub rent_date: NaiveDate,
    pub proposed_return_date: NaiveDate,
    pub actual_return_date: ReturnDate,
    pub status: RentalStatus,
}

impl RentalEdit {
    /// Start an edit from the agreement's current values
    pub fn from_agreement(rental: &RentalAgreement) -> Self {
        RentalEdit {
            customer: rental.customer().clone(),
            rent_date: rental.rent_date(),
            proposed_return_date: rental.proposed_return_date(),
            actual_return_date: rental.actual_return_date(),
            status: rental.status(),
        }
    }
}

/// Outcome of a vehicle availability change
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityChange {
    /// The vehicle already had the requested status
    NoChange,
    /// The operator declined to confirm the return; nothing was written
    Declined,
    Updated(Vehicle),
}

/// Vehicle side effect of a history edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleTransition {
    /// Agreement went Rented -> Returned, vehicle is available again
    Returned,
    /// Agreement was forced Returned -> Rented, vehicle is rented again
    ReRented,
}

/// Result of a history edit
#[derive(Debug, Clone, PartialEq)]
pub struct RentalUpdate {
    pub rental: RentalAgreement,
    pub vehicle: Vehicle,
    pub transition: Option<VehicleTransition>,
}

/// One row of the rental history view
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub rental: RentalAgreement,
    pub vehicle_label: String,
}

enum RentalWrite {
    Insert(RentalAgreement),
    Update(RentalAgreement),
}

/// A combined agreement + vehicle write
struct Transition {
    rental: RentalWrite,
    vehicle: Option<Vehicle>,
}

/// Drives rentals over a vehicle store and a rental store
pub struct RentalController<'a, V, R> {
    vehicles: &'a V,
    rentals: &'a R,
}

impl<'a, V, R> RentalController<'a, V, R>
where
    V: RecordStore<Vehicle>,
    R: RecordStore<RentalAgreement>,
{
    pub fn new(vehicles: &'a V, rentals: &'a R) -> Self {
        RentalController { vehicles, rentals }
    }

    pub fn vehicle(&self, vehicle_id: &str) -> Result<Vehicle, RentalError> {
        self.vehicles
            .find_by_key(vehicle_id)?
            .ok_or_else(|| RentalError::not_found(Vehicle::COLLECTION, vehicle_id))
    }

    pub fn rental(&self, rental_id: &str) -> Result<RentalAgreement, RentalError> {
        self.rentals
            .find_by_key(rental_id)?
            .ok_or_else(|| RentalError::not_found(RentalAgreement::COLLECTION, rental_id))
    }

    /// Agreements with status `Rented` that reference `vehicle_id`
    pub fn open_rentals_for(&self, vehicle_id: &str) -> Result<Vec<RentalAgreement>, RentalError> {
        Ok(self
            .rentals
            .load_all()?
            .into_iter()
            .filter(|r| r.vehicle_id() == vehicle_id && r.is_open())
            .collect())
    }

    /// Rent an available vehicle to a customer
    ///
    /// # Errors
    ///
    /// - `Validation` if a customer field is empty or a date is malformed
    /// - `NotFound` if the vehicle is not in the catalog
    /// - `VehicleUnavailable` if the vehicle is already rented
    ///
    /// Nothing is written when any precondition fails.
    pub fn create_rental(
        &self,
        vehicle_id: &str,
        request: &RentalRequest,
    ) -> Result<RentalAgreement, RentalError> {
        let customer = CustomerDetails::new(
            &request.customer_id,
            &request.customer_name,
            &request.customer_address,
            &request.customer_tel,
        )?;
        let rent_date = parse_date("rent_date", &request.rent_date)?;
        let proposed_return_date =
            parse_date("proposed_return_date", &request.proposed_return_date)?;

        let mut vehicle = self.vehicle(vehicle_id)?;
        if !vehicle.is_available() {
            return Err(RentalError::vehicle_unavailable(vehicle_id));
        }

        let rental_id = Uuid::new_v4().to_string();
        let rental = RentalAgreement::open(
            &rental_id,
            vehicle_id,
            customer,
            rent_date,
            proposed_return_date,
        );
        vehicle.set_available(false);

        self.apply_transition(Transition {
            rental: RentalWrite::Insert(rental.clone()),
            vehicle: Some(vehicle),
        })?;

        info!(rental_id = %rental_id, vehicle_id, "vehicle rented");
        Ok(rental)
    }

    /// Set a vehicle's availability from the catalog
    ///
    /// Making a vehicle available while open agreements reference it calls
    /// `confirm` with the vehicle and those agreements; returning `false`
    /// aborts without writing. Agreements are never modified here.
    pub fn set_vehicle_availability<C>(
        &self,
        vehicle_id: &str,
        status: AvailabilityStatus,
        mut confirm: C,
    ) -> Result<AvailabilityChange, RentalError>
    where
        C: FnMut(&Vehicle, &[RentalAgreement]) -> bool,
    {
        let mut vehicle = self.vehicle(vehicle_id)?;
        let available = status.is_available();

        if vehicle.is_available() == available {
            return Ok(AvailabilityChange::NoChange);
        }

        if available {
            let open = self.open_rentals_for(vehicle_id)?;
            if !open.is_empty() && !confirm(&vehicle, &open) {
                info!(vehicle_id, open = open.len(), "return not confirmed");
                return Ok(AvailabilityChange::Declined);
            }
        }

        vehicle.set_available(available);
        self.vehicles.update_by_key(&vehicle)?;

        info!(vehicle_id, status = %status, "vehicle status updated");
        Ok(AvailabilityChange::Updated(vehicle))
    }

    /// Apply a history edit to an agreement
    ///
    /// A status change flips the vehicle: Rented -> Returned makes it
    /// available, Returned -> Rented makes it unavailable.
    ///
    /// # Errors
    ///
    /// `NotFound` if the agreement or its vehicle does not exist; nothing is
    /// written in either case.
    pub fn edit_rental(
        &self,
        rental_id: &str,
        edit: RentalEdit,
    ) -> Result<RentalUpdate, RentalError> {
        let mut rental = self.rental(rental_id)?;
        let mut vehicle = self.vehicle(rental.vehicle_id())?;
        let original_status = rental.status();

        rental.set_customer(edit.customer);
        rental.set_rent_date(edit.rent_date);
        rental.set_proposed_return_date(edit.proposed_return_date);
        rental.set_actual_return_date(edit.actual_return_date);
        rental.set_status(edit.status);

        let transition = match (original_status, edit.status) {
            (RentalStatus::Rented, RentalStatus::Returned) => {
                vehicle.set_available(true);
                Some(VehicleTransition::Returned)
            }
            (RentalStatus::Returned, RentalStatus::Rented) => {
                vehicle.set_available(false);
                Some(VehicleTransition::ReRented)
            }
            _ => None,
        };

        self.apply_transition(Transition {
            rental: RentalWrite::Update(rental.clone()),
            vehicle: transition.map(|_| vehicle.clone()),
        })?;

        info!(rental_id, status = %rental.status(), ?transition, "rental updated");
        Ok(RentalUpdate {
            rental,
            vehicle,
            transition,
        })
    }

    /// Every agreement with a label for its vehicle
    pub fn history(&self) -> Result<Vec<HistoryEntry>, RentalError> {
        let vehicles = self.vehicles.load_all()?;

        Ok(self
            .rentals
            .load_all()?
            .into_iter()
            .map(|rental| {
                let vehicle_label = vehicles
                    .iter()
                    .find(|v| v.vehicle_id() == rental.vehicle_id())
                    .map_or_else(|| UNKNOWN_VEHICLE.to_string(), Vehicle::label);
                HistoryEntry {
                    rental,
                    vehicle_label,
                }
            })
            .collect())
    }

    fn apply_transition(&self, transition: Transition) -> Result<(), RentalError> {
        let rental_id = match &transition.rental {
            RentalWrite::Insert(rental) => {
                self.rentals.append(rental.clone())?;
                rental.rental_id().to_string()
            }
            RentalWrite::Update(rental) => {
                self.rentals.update_by_key(rental)?;
                rental.rental_id().to_string()
            }
        };

        if let Some(vehicle) = transition.vehicle {
            if let Err(e) = self.vehicles.update_by_key(&vehicle) {
                error!(
                    rental_id = %rental_id,
                    vehicle_id = vehicle.vehicle_id(),
                    error = %e,
                    "rental written but vehicle update failed"
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fee::total_fee;
    use crate::core::memory_store::MemoryStore;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn vehicle(id: &str, available: bool) -> Vehicle {
        Vehicle::new(
            id,
            "Car",
            "Toyota",
            "Corolla",
            2024,
            Decimal::new(5000, 2),
            "images/toyota_corolla.jpg",
            available,
        )
        .unwrap()
    }

    fn request() -> RentalRequest {
        RentalRequest {
            customer_id: "C1".to_string(),
            customer_name: "Nimal Perera".to_string(),
            customer_address: "12 Galle Road".to_string(),
            customer_tel: "0771234567".to_string(),
            rent_date: "2025-01-01".to_string(),
            proposed_return_date: "2025-01-04".to_string(),
        }
    }

    fn stores(
        vehicles: Vec<Vehicle>,
    ) -> (MemoryStore<Vehicle>, MemoryStore<RentalAgreement>) {
        (MemoryStore::with_records(vehicles), MemoryStore::new())
    }

    #[test]
    fn test_create_rental_marks_vehicle_rented() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);

        let rental = controller.create_rental("V1", &request()).unwrap();

        assert_eq!(rental.status(), RentalStatus::Rented);
        assert_eq!(rental.actual_return_date(), ReturnDate::NotReturned);
        assert_eq!(rentals.load_all().unwrap(), vec![rental.clone()]);
        assert!(!controller.vehicle("V1").unwrap().is_available());

        let v = controller.vehicle("V1").unwrap();
        let quote =
            total_fee(rental.rent_date(), rental.proposed_return_date(), v.daily_rate()).unwrap();
        assert_eq!(quote.days, 3);
        assert_eq!(quote.total, Decimal::new(15000, 2));
    }

    #[test]
    fn test_create_rental_generates_unique_ids() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true), vehicle("V2", true)]);
        let controller = RentalController::new(&vehicles, &rentals);

        let a = controller.create_rental("V1", &request()).unwrap();
        let b = controller.create_rental("V2", &request()).unwrap();

        assert_ne!(a.rental_id(), b.rental_id());
    }

    #[test]
    fn test_create_rental_rejects_unavailable_vehicle() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", false)]);
        let controller = RentalController::new(&vehicles, &rentals);

        let err = controller.create_rental("V1", &request()).unwrap_err();

        assert_eq!(err, RentalError::vehicle_unavailable("V1"));
        assert!(rentals.load_all().unwrap().is_empty());
        assert_eq!(vehicles.load_all().unwrap(), vec![vehicle("V1", false)]);
    }

    #[test]
    fn test_create_rental_unknown_vehicle() {
        let (vehicles, rentals) = stores(vec![]);
        let controller = RentalController::new(&vehicles, &rentals);

        let err = controller.create_rental("V404", &request()).unwrap_err();
        assert_eq!(err, RentalError::not_found("vehicles", "V404"));
    }

    #[rstest]
    #[case::missing_name("customer_name", "")]
    #[case::blank_tel("customer_tel", "  ")]
    #[case::bad_rent_date("rent_date", "2025/01/01")]
    #[case::missing_return_date("proposed_return_date", "")]
    fn test_create_rental_validation(#[case] field: &str, #[case] value: &str) {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let mut req = request();
        match field {
            "customer_name" => req.customer_name = value.to_string(),
            "customer_tel" => req.customer_tel = value.to_string(),
            "rent_date" => req.rent_date = value.to_string(),
            "proposed_return_date" => req.proposed_return_date = value.to_string(),
            _ => panic!("Unknown field: {}", field),
        }

        let err = controller.create_rental("V1", &req).unwrap_err();

        assert!(matches!(err, RentalError::Validation { .. }));
        assert!(rentals.load_all().unwrap().is_empty());
        assert!(controller.vehicle("V1").unwrap().is_available());
    }

    #[test]
    fn test_mark_returned_frees_vehicle_without_confirmation() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();

        let mut edit = RentalEdit::from_agreement(&rental);
        edit.status = RentalStatus::Returned;
        edit.actual_return_date = "2025-01-04".parse().unwrap();
        let update = controller.edit_rental(rental.rental_id(), edit).unwrap();

        assert_eq!(update.transition, Some(VehicleTransition::Returned));
        assert_eq!(
            controller.rental(rental.rental_id()).unwrap().status(),
            RentalStatus::Returned
        );
        assert!(controller.vehicle("V1").unwrap().is_available());
    }

    #[test]
    fn test_force_rerent_correction() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();

        let mut edit = RentalEdit::from_agreement(&rental);
        edit.status = RentalStatus::Returned;
        controller.edit_rental(rental.rental_id(), edit.clone()).unwrap();

        edit.status = RentalStatus::Rented;
        let update = controller.edit_rental(rental.rental_id(), edit).unwrap();

        assert_eq!(update.transition, Some(VehicleTransition::ReRented));
        assert!(!controller.vehicle("V1").unwrap().is_available());
    }

    #[test]
    fn test_edit_without_status_change_keeps_vehicle() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();

        let mut edit = RentalEdit::from_agreement(&rental);
        edit.customer = CustomerDetails::new("C1", "Nimal P.", "Kandy", "0779999999").unwrap();
        let update = controller.edit_rental(rental.rental_id(), edit).unwrap();

        assert_eq!(update.transition, None);
        let stored = controller.rental(rental.rental_id()).unwrap();
        assert_eq!(stored.customer().address(), "Kandy");
        assert!(!controller.vehicle("V1").unwrap().is_available());
    }

    #[test]
    fn test_edit_rental_with_missing_vehicle_writes_nothing() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();
        vehicles.rewrite_all(&[]).unwrap();

        let mut edit = RentalEdit::from_agreement(&rental);
        edit.status = RentalStatus::Returned;
        let err = controller.edit_rental(rental.rental_id(), edit).unwrap_err();

        assert_eq!(err, RentalError::not_found("vehicles", "V1"));
        assert_eq!(rentals.load_all().unwrap(), vec![rental]);
    }

    #[test]
    fn test_edit_unknown_rental() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = RentalAgreement::open(
            "R-missing",
            "V1",
            CustomerDetails::new("C", "N", "A", "T").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        );

        let err = controller
            .edit_rental("R-missing", RentalEdit::from_agreement(&rental))
            .unwrap_err();
        assert_eq!(err, RentalError::not_found("rentals", "R-missing"));
    }

    #[test]
    fn test_set_available_requires_confirmation() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();

        let mut asked = 0;
        let change = controller
            .set_vehicle_availability("V1", AvailabilityStatus::Available, |_, open| {
                asked += 1;
                assert_eq!(open.len(), 1);
                false
            })
            .unwrap();

        assert_eq!(asked, 1);
        assert_eq!(change, AvailabilityChange::Declined);
        assert!(!controller.vehicle("V1").unwrap().is_available());
        assert_eq!(controller.rental(rental.rental_id()).unwrap(), rental);
    }

    #[test]
    fn test_set_available_confirmed() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();

        let change = controller
            .set_vehicle_availability("V1", AvailabilityStatus::Available, |_, _| true)
            .unwrap();

        assert!(matches!(change, AvailabilityChange::Updated(ref v) if v.is_available()));
        assert!(controller.vehicle("V1").unwrap().is_available());
        // agreement records are not touched by the catalog path
        assert_eq!(
            controller.rental(rental.rental_id()).unwrap().status(),
            RentalStatus::Rented
        );
    }

    #[test]
    fn test_set_available_without_open_rentals_skips_confirmation() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", false)]);
        let controller = RentalController::new(&vehicles, &rentals);

        let change = controller
            .set_vehicle_availability("V1", AvailabilityStatus::Available, |_, _| {
                panic!("confirmation should not be requested")
            })
            .unwrap();

        assert!(matches!(change, AvailabilityChange::Updated(_)));
    }

    #[rstest]
    #[case::already_available(true, AvailabilityStatus::Available)]
    #[case::already_rented(false, AvailabilityStatus::Rented)]
    fn test_set_availability_no_change(
        #[case] available: bool,
        #[case] status: AvailabilityStatus,
    ) {
        let (vehicles, rentals) = stores(vec![vehicle("V1", available)]);
        let controller = RentalController::new(&vehicles, &rentals);

        let change = controller
            .set_vehicle_availability("V1", status, |_, _| true)
            .unwrap();
        assert_eq!(change, AvailabilityChange::NoChange);
    }

    #[test]
    fn test_set_rented_from_catalog() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);

        controller
            .set_vehicle_availability("V1", AvailabilityStatus::Rented, |_, _| true)
            .unwrap();
        assert!(!controller.vehicle("V1").unwrap().is_available());
    }

    #[test]
    fn test_history_labels_unknown_vehicle() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true), vehicle("V2", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        controller.create_rental("V1", &request()).unwrap();
        controller.create_rental("V2", &request()).unwrap();
        vehicles.rewrite_all(&[vehicle("V1", false)]).unwrap();

        let history = controller.history().unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].vehicle_label, "Toyota Corolla");
        assert_eq!(history[1].vehicle_label, UNKNOWN_VEHICLE);
    }

    #[test]
    fn test_open_rentals_for_ignores_returned() {
        let (vehicles, rentals) = stores(vec![vehicle("V1", true)]);
        let controller = RentalController::new(&vehicles, &rentals);
        let rental = controller.create_rental("V1", &request()).unwrap();
        let mut edit = RentalEdit::from_agreement(&rental);
        edit.status = RentalStatus::Returned;
        controller.edit_rental(rental.rental_id(), edit).unwrap();

        assert!(controller.open_rentals_for("V1").unwrap().is_empty());
    }
}
