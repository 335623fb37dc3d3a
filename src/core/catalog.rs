//! Vehicle catalog browsing
//!
//! Search, type filtering and fee sorting over a loaded vehicle list, plus the
//! image lookup with placeholder fallback and catalog entry of new vehicles.

use crate::core::traits::{Record, RecordStore};
use crate::types::{RentalError, Vehicle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ordering applied to the catalog by daily rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeSort {
    #[default]
    None,
    LowToHigh,
    HighToLow,
}

/// Catalog view parameters
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against make, model and type
    pub search: Option<String>,
    /// Exact vehicle type; `None` means all types
    pub vehicle_type: Option<String>,
    pub sort: FeeSort,
}

impl CatalogQuery {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        let search_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                vehicle.make().to_lowercase().contains(&term)
                    || vehicle.model().to_lowercase().contains(&term)
                    || vehicle.vehicle_type().to_lowercase().contains(&term)
            }
        };

        let type_ok = self
            .vehicle_type
            .as_deref()
            .map_or(true, |t| vehicle.vehicle_type() == t);

        search_ok && type_ok
    }

    /// Search first, then filter by type, then sort by fee
    pub fn apply(&self, vehicles: &[Vehicle]) -> Vec<Vehicle> {
        let mut selected: Vec<Vehicle> = vehicles
            .iter()
            .filter(|v| self.matches(v))
            .cloned()
            .collect();

        match self.sort {
            FeeSort::None => {}
            FeeSort::LowToHigh => selected.sort_by_key(|v| v.daily_rate()),
            FeeSort::HighToLow => selected.sort_by(|a, b| b.daily_rate().cmp(&a.daily_rate())),
        }

        selected
    }
}

/// Sorted distinct vehicle types
pub fn vehicle_types(vehicles: &[Vehicle]) -> Vec<String> {
    vehicles
        .iter()
        .map(|v| v.vehicle_type().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Image to show for a vehicle: its own asset if present, else the placeholder
///
/// Relative image paths are resolved against `base_dir`.
pub fn resolve_image(vehicle: &Vehicle, base_dir: &Path, placeholder: &Path) -> PathBuf {
    let candidate = base_dir.join(vehicle.image_path());
    if !vehicle.image_path().is_empty() && candidate.is_file() {
        candidate
    } else {
        base_dir.join(placeholder)
    }
}

/// Enter a new vehicle into the catalog
///
/// # Errors
///
/// Returns `DuplicateKey` if the vehicle id is already in the catalog.
pub fn add_vehicle<S: RecordStore<Vehicle>>(store: &S, vehicle: Vehicle) -> Result<(), RentalError> {
    let vehicle_id = vehicle.vehicle_id().to_string();
    if !store.append_unique(vehicle)? {
        return Err(RentalError::duplicate_key(Vehicle::COLLECTION, &vehicle_id));
    }

    info!(vehicle_id = %vehicle_id, "added vehicle to catalog");
    Ok(())
}
