//! Command execution
//!
//! Each command opens the office, checks credentials where needed and talks to
//! the stores only through the account directory, the catalog helpers and the
//! rental controller. All operator-facing text goes to `output`.

use crate::cli::args::{CliArgs, Command};
use crate::config::Config;
use crate::core::catalog::{self, CatalogQuery};
use crate::core::fee::{preview_fee, total_fee, FeeQuote};
use crate::core::lifecycle::{
    AvailabilityChange, RentalEdit, RentalRequest, VehicleTransition, UNKNOWN_VEHICLE,
};
use crate::core::{RecordStore, Session};
use crate::office::Office;
use crate::types::{
    parse_date, CustomerDetails, RentalAgreement, RentalError, ReturnDate, Vehicle, DATE_FORMAT,
};
use chrono::Local;
use std::io::Write;
use tracing::info_span;

/// Execute the parsed command
///
/// `confirm` is asked before a vehicle with open rentals is made available
/// again (unless `--yes` was given).
pub fn run<C>(args: &CliArgs, output: &mut dyn Write, confirm: C) -> Result<(), RentalError>
where
    C: FnMut(&Vehicle, &[RentalAgreement]) -> bool,
{
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    let office = Office::open(&config)?;

    match &args.command {
        Command::Init => {
            writeln!(output, "Collections ready in {}", config.data_dir.display())?;
            Ok(())
        }
        Command::Register { username, password } => {
            office.directory().register(username, password)?;
            writeln!(output, "Account created successfully! Please login.")?;
            Ok(())
        }
        command => {
            let session = login(&office, args)?;
            let _span = info_span!("command", operator = session.username()).entered();
            run_as(&office, &config, &session, command, output, confirm)
        }
    }
}

fn login(office: &Office, args: &CliArgs) -> Result<Session, RentalError> {
    match (args.user.as_deref(), args.password.as_deref()) {
        (Some(user), Some(password)) => office.directory().login(user, password),
        _ => Err(RentalError::validation(
            "login",
            "pass --user and --password (or RENTAL_DESK_USER / RENTAL_DESK_PASSWORD)",
        )),
    }
}

fn run_as<C>(
    office: &Office,
    config: &Config,
    session: &Session,
    command: &Command,
    output: &mut dyn Write,
    mut confirm: C,
) -> Result<(), RentalError>
where
    C: FnMut(&Vehicle, &[RentalAgreement]) -> bool,
{
    let controller = office.controller();

    match command {
        Command::Init | Command::Register { .. } => Ok(()),

        Command::Login => {
            writeln!(output, "Welcome, {}!", session.username())?;
            Ok(())
        }

        Command::Vehicles {
            search,
            vehicle_type,
            sort,
        } => {
            let query = CatalogQuery {
                search: search.clone(),
                vehicle_type: vehicle_type.clone(),
                sort: (*sort).into(),
            };
            list_vehicles(office, config, &query, output)
        }

        Command::Types => {
            for kind in catalog::vehicle_types(&office.vehicles.load_all()?) {
                writeln!(output, "{}", kind)?;
            }
            Ok(())
        }

        Command::AddVehicle {
            vehicle_id,
            vehicle_type,
            make,
            model,
            year,
            daily_rate,
            image_path,
        } => {
            let vehicle = Vehicle::new(
                vehicle_id,
                vehicle_type,
                make,
                model,
                *year,
                *daily_rate,
                image_path,
                true,
            )?;
            let label = vehicle.label();
            catalog::add_vehicle(&office.vehicles, vehicle)?;
            writeln!(output, "Added {} ({}) to the catalog.", label, vehicle_id)?;
            Ok(())
        }

        Command::SetStatus {
            vehicle_id,
            status,
            yes,
        } => {
            let change = controller.set_vehicle_availability(vehicle_id, *status, |v, open| {
                *yes || confirm(v, open)
            })?;
            match change {
                AvailabilityChange::NoChange => {
                    writeln!(output, "No change: vehicle status is already set to this value.")?
                }
                AvailabilityChange::Declined => {
                    writeln!(output, "Status change cancelled.")?
                }
                AvailabilityChange::Updated(vehicle) => {
                    writeln!(output, "{} is now {}.", vehicle.label(), vehicle.status())?
                }
            }
            Ok(())
        }

        Command::Quote {
            vehicle_id,
            rent_date,
            return_date,
        } => {
            let vehicle = controller.vehicle(vehicle_id)?;
            writeln!(output, "Daily Rate: Rs{:.2}", vehicle.daily_rate())?;
            let quote = preview_fee(rent_date, return_date, vehicle.daily_rate());
            writeln!(output, "{}", fee_line(quote))?;
            Ok(())
        }

        Command::Rent {
            vehicle_id,
            customer_id,
            customer_name,
            customer_address,
            customer_tel,
            rent_date,
            return_date,
        } => {
            let request = RentalRequest {
                customer_id: customer_id.clone(),
                customer_name: customer_name.clone(),
                customer_address: customer_address.clone(),
                customer_tel: customer_tel.clone(),
                rent_date: rent_date
                    .clone()
                    .unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string()),
                proposed_return_date: return_date.clone(),
            };
            let rental = controller.create_rental(vehicle_id, &request)?;
            let vehicle = controller.vehicle(vehicle_id)?;
            let quote = total_fee(
                rental.rent_date(),
                rental.proposed_return_date(),
                vehicle.daily_rate(),
            );

            writeln!(output, "Vehicle rented successfully!")?;
            writeln!(output, "Rental ID: {}", rental.rental_id())?;
            writeln!(output, "{}", fee_line(quote))?;
            Ok(())
        }

        Command::History => {
            let history = controller.history()?;
            if history.is_empty() {
                writeln!(output, "No rentals recorded.")?;
                return Ok(());
            }
            writeln!(
                output,
                "{:<36}  {:<22}  {:<20}  {:<10}  {:<15}  {:<13}  Status",
                "Rental ID", "Vehicle", "Customer Name", "Rent Date", "Proposed Return", "Actual Return"
            )?;
            for entry in history {
                let rental = &entry.rental;
                writeln!(
                    output,
                    "{:<36}  {:<22}  {:<20}  {:<10}  {:<15}  {:<13}  {}",
                    rental.rental_id(),
                    entry.vehicle_label,
                    rental.customer().name(),
                    rental.rent_date().format(DATE_FORMAT).to_string(),
                    rental.proposed_return_date().format(DATE_FORMAT).to_string(),
                    rental.actual_return_date().to_string(),
                    rental.status()
                )?;
            }
            Ok(())
        }

        Command::ShowRental { rental_id } => {
            let rental = controller.rental(rental_id)?;
            let vehicle_label = office
                .vehicles
                .find_by_key(rental.vehicle_id())?
                .map(|v| format!("{} (ID: {})", v.label(), v.vehicle_id()))
                .unwrap_or_else(|| UNKNOWN_VEHICLE.to_string());
            show_rental(&rental, &vehicle_label, output)
        }

        Command::EditRental {
            rental_id,
            customer_id,
            customer_name,
            customer_address,
            customer_tel,
            rent_date,
            proposed_return_date,
            actual_return_date,
            status,
        } => {
            let current = controller.rental(rental_id)?;
            let mut edit = RentalEdit::from_agreement(&current);

            let customer = current.customer();
            edit.customer = CustomerDetails::new(
                customer_id.as_deref().unwrap_or(customer.id()),
                customer_name.as_deref().unwrap_or(customer.name()),
                customer_address.as_deref().unwrap_or(customer.address()),
                customer_tel.as_deref().unwrap_or(customer.tel()),
            )?;
            if let Some(text) = rent_date {
                edit.rent_date = parse_date("rent_date", text)?;
            }
            if let Some(text) = proposed_return_date {
                edit.proposed_return_date = parse_date("proposed_return_date", text)?;
            }
            if let Some(text) = actual_return_date {
                edit.actual_return_date = text.parse::<ReturnDate>()?;
            }
            if let Some(status) = status {
                edit.status = *status;
            }

            let update = controller.edit_rental(rental_id, edit)?;
            match update.transition {
                Some(VehicleTransition::Returned) => writeln!(
                    output,
                    "Vehicle {} is now marked as Available.",
                    update.vehicle.label()
                )?,
                Some(VehicleTransition::ReRented) => writeln!(
                    output,
                    "Vehicle {} is now marked as Rented.",
                    update.vehicle.label()
                )?,
                None => {}
            }
            writeln!(output, "Rental record updated successfully!")?;
            Ok(())
        }
    }
}

fn list_vehicles(
    office: &Office,
    config: &Config,
    query: &CatalogQuery,
    output: &mut dyn Write,
) -> Result<(), RentalError> {
    let vehicles = query.apply(&office.vehicles.load_all()?);
    if vehicles.is_empty() {
        writeln!(output, "No vehicles found.")?;
        return Ok(());
    }

    for vehicle in &vehicles {
        let image = catalog::resolve_image(vehicle, &config.images_dir, &config.placeholder_image);
        writeln!(
            output,
            "{:<8}  {:<22}  {:<4}  {:<8}  {:>12}  {:<9}  {}",
            vehicle.vehicle_id(),
            vehicle.label(),
            vehicle.year(),
            vehicle.vehicle_type(),
            format!("Rs{:.2}/day", vehicle.daily_rate()),
            vehicle.status().to_string(),
            image.display()
        )?;
    }
    Ok(())
}

fn show_rental(
    rental: &RentalAgreement,
    vehicle_label: &str,
    output: &mut dyn Write,
) -> Result<(), RentalError> {
    let customer = rental.customer();
    let fields = [
        ("Rental ID", rental.rental_id().to_string()),
        ("Vehicle", vehicle_label.to_string()),
        ("Customer ID", customer.id().to_string()),
        ("Customer Name", customer.name().to_string()),
        ("Customer Address", customer.address().to_string()),
        ("Customer Tel", customer.tel().to_string()),
        ("Rent Date", rental.rent_date().format(DATE_FORMAT).to_string()),
        (
            "Proposed Return Date",
            rental.proposed_return_date().format(DATE_FORMAT).to_string(),
        ),
        ("Actual Return Date", rental.actual_return_date().to_string()),
        ("Status", rental.status().to_string()),
    ];

    for (label, value) in fields {
        writeln!(output, "{:<21} {}", format!("{}:", label), value)?;
    }
    Ok(())
}

fn fee_line(quote: Option<FeeQuote>) -> String {
    match quote {
        Some(q) => format!("Total Fee for {} day(s): Rs{:.2}", q.days, q.total),
        None => "Total Fee: Rs0.00".to_string(),
    }
}
