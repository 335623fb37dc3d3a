//! The rental office: the three CSV collections opened from configuration

use crate::config::Config;
use crate::core::accounts::AccountDirectory;
use crate::core::lifecycle::RentalController;
use crate::core::traits::RecordStore;
use crate::io::CsvStore;
use crate::types::{RentalAgreement, RentalError, StaffAccount, Vehicle};

pub struct Office {
    pub accounts: CsvStore<StaffAccount>,
    pub vehicles: CsvStore<Vehicle>,
    pub rentals: CsvStore<RentalAgreement>,
}

impl Office {
    /// Point the stores at the configured files without touching the disk
    pub fn new(config: &Config) -> Self {
        Office {
            accounts: CsvStore::new(config.accounts_path()),
            vehicles: CsvStore::new(config.vehicles_path()),
            rentals: CsvStore::new(config.rentals_path()),
        }
    }

    /// Open the office, creating any missing collection file with its header
    pub fn open(config: &Config) -> Result<Self, RentalError> {
        let office = Self::new(config);
        office.accounts.ensure_initialized()?;
        office.vehicles.ensure_initialized()?;
        office.rentals.ensure_initialized()?;
        Ok(office)
    }

    pub fn directory(&self) -> AccountDirectory<'_, CsvStore<StaffAccount>> {
        AccountDirectory::new(&self.accounts)
    }

    pub fn controller(
        &self,
    ) -> RentalController<'_, CsvStore<Vehicle>, CsvStore<RentalAgreement>> {
        RentalController::new(&self.vehicles, &self.rentals)
    }
}
