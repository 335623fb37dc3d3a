use crate::core::FeeSort;
use crate::types::{AvailabilityStatus, RentalStatus};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Vehicle rental office record keeping
#[derive(Parser, Debug)]
#[command(name = "rental-desk")]
#[command(about = "Vehicle rental office record keeping", long_about = None)]
pub struct CliArgs {
    /// Configuration file (defaults to the per-user config, if any)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the collection files (overrides the config)
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Staff username for commands that need a logged-in operator
    #[arg(long = "user", value_name = "USERNAME", env = "RENTAL_DESK_USER", global = true)]
    pub user: Option<String>,

    /// Staff password for commands that need a logged-in operator
    #[arg(
        long = "password",
        value_name = "PASSWORD",
        env = "RENTAL_DESK_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create any missing collection files
    Init,

    /// Register a new staff account
    Register {
        #[arg(value_name = "USERNAME")]
        username: String,
        #[arg(value_name = "PASSWORD")]
        password: String,
    },

    /// Check credentials
    Login,

    /// List the vehicle catalog
    Vehicles {
        /// Match make, model or type (case-insensitive)
        #[arg(long = "search", value_name = "TEXT")]
        search: Option<String>,

        /// Only show this vehicle type
        #[arg(long = "type", value_name = "TYPE")]
        vehicle_type: Option<String>,

        #[arg(long = "sort", value_name = "ORDER", default_value = "none")]
        sort: SortOrder,
    },

    /// List the distinct vehicle types
    Types,

    /// Enter a new vehicle into the catalog
    AddVehicle {
        #[arg(value_name = "VEHICLE_ID")]
        vehicle_id: String,
        #[arg(long = "type", value_name = "TYPE")]
        vehicle_type: String,
        #[arg(long = "make")]
        make: String,
        #[arg(long = "model")]
        model: String,
        #[arg(long = "year")]
        year: i32,
        #[arg(long = "rate", value_name = "DAILY_RATE")]
        daily_rate: Decimal,
        #[arg(long = "image", value_name = "PATH", default_value = "")]
        image_path: String,
    },

    /// Change a vehicle's availability
    SetStatus {
        #[arg(value_name = "VEHICLE_ID")]
        vehicle_id: String,
        /// `available` or `rented`
        #[arg(value_name = "STATUS")]
        status: AvailabilityStatus,
        /// Confirm the return without prompting
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Preview the total fee for a rental period
    Quote {
        #[arg(value_name = "VEHICLE_ID")]
        vehicle_id: String,
        #[arg(long = "rent-date", value_name = "YYYY-MM-DD")]
        rent_date: String,
        #[arg(long = "return-date", value_name = "YYYY-MM-DD")]
        return_date: String,
    },

    /// Rent a vehicle to a customer
    Rent {
        #[arg(value_name = "VEHICLE_ID")]
        vehicle_id: String,
        #[arg(long = "customer-id")]
        customer_id: String,
        #[arg(long = "name")]
        customer_name: String,
        #[arg(long = "address")]
        customer_address: String,
        #[arg(long = "tel")]
        customer_tel: String,
        /// Defaults to today
        #[arg(long = "rent-date", value_name = "YYYY-MM-DD")]
        rent_date: Option<String>,
        #[arg(long = "return-date", value_name = "YYYY-MM-DD")]
        return_date: String,
    },

    /// Show every rental agreement
    History,

    /// Show one rental agreement
    ShowRental {
        #[arg(value_name = "RENTAL_ID")]
        rental_id: String,
    },

    /// Edit a rental agreement; omitted fields keep their current value
    EditRental {
        #[arg(value_name = "RENTAL_ID")]
        rental_id: String,
        #[arg(long = "customer-id")]
        customer_id: Option<String>,
        #[arg(long = "name")]
        customer_name: Option<String>,
        #[arg(long = "address")]
        customer_address: Option<String>,
        #[arg(long = "tel")]
        customer_tel: Option<String>,
        #[arg(long = "rent-date", value_name = "YYYY-MM-DD")]
        rent_date: Option<String>,
        #[arg(long = "return-date", value_name = "YYYY-MM-DD")]
        proposed_return_date: Option<String>,
        /// Actual return date, or `N/A`
        #[arg(long = "actual-return", value_name = "YYYY-MM-DD|N/A")]
        actual_return_date: Option<String>,
        /// `rented` or `returned`
        #[arg(long = "status", value_name = "STATUS")]
        status: Option<RentalStatus>,
    },
}

/// Catalog ordering by daily rate
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SortOrder {
    None,
    LowToHigh,
    HighToLow,
}

impl From<SortOrder> for FeeSort {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::None => FeeSort::None,
            SortOrder::LowToHigh => FeeSort::LowToHigh,
            SortOrder::HighToLow => FeeSort::HighToLow,
        }
    }
}
