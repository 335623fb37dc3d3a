//! Rental Desk CLI
//!
//! Command-line front end for a vehicle-rental office: staff accounts, the
//! vehicle catalog and rental agreements, each kept in a CSV file.
//!
//! # Usage
//!
//! ```bash
//! rental-desk register alice secret
//! rental-desk --user alice --password secret vehicles --sort low-to-high
//! rental-desk --user alice --password secret rent V1 --customer-id C1 \
//!     --name "Nimal Perera" --address Colombo --tel 0771234567 --return-date 2025-01-04
//! rental-desk --user alice --password secret edit-rental <RENTAL_ID> --status returned
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad credentials, unknown record, unreadable collection, etc.)

use anyhow::Result;
use rental_desk::cli;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rental_desk=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::parse_args();

    let stdin = io::stdin();
    let mut output = io::stdout().lock();
    cli::run(&args, &mut output, |vehicle, open_rentals| {
        cli::prompt::confirm_return(&mut stdin.lock(), &mut io::stderr(), vehicle, open_rentals)
    })?;
    output.flush()?;
    Ok(())
}
