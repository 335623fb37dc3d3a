//! Interactive yes/no confirmation

use crate::types::{RentalAgreement, Vehicle};
use std::io::{BufRead, Write};

/// Ask the operator to confirm that a rented vehicle has come back
///
/// Only `y`/`yes` (any case) confirms; anything else, including end of input
/// or a read error, declines.
pub fn confirm_return(
    input: &mut dyn BufRead,
    prompt: &mut dyn Write,
    vehicle: &Vehicle,
    open_rentals: &[RentalAgreement],
) -> bool {
    let asked = write!(
        prompt,
        "There are {} active rental record(s) for {}. \
         Are you sure the customer has returned the vehicle? \
         Please update the rental record(s) in the rental history too. [y/N] ",
        open_rentals.len(),
        vehicle.label()
    )
    .and_then(|_| prompt.flush());
    if asked.is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}
