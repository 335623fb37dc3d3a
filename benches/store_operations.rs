//! Benchmark suite for the CSV record store
//!
//! Every mutation regenerates the whole collection file, so these benchmarks
//! measure load, full rewrite and single-record update over catalogs of
//! different sizes using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rental_desk::{CsvStore, RecordStore, Vehicle};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn main() {
    divan::main();
}

const SIZES: &[usize] = &[10, 100, 1_000];

fn catalog(size: usize) -> Vec<Vehicle> {
    (0..size)
        .map(|i| {
            Vehicle::new(
                &format!("V{:05}", i),
                if i % 3 == 0 { "Van" } else { "Car" },
                "Toyota",
                "Corolla",
                2015 + (i % 10) as i32,
                Decimal::new(4_000 + (i as i64 % 50) * 100, 2),
                "",
                i % 2 == 0,
            )
            .expect("Invalid benchmark vehicle")
        })
        .collect()
}

fn populated_store(size: usize) -> (TempDir, CsvStore<Vehicle>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = CsvStore::new(dir.path().join("vehicles.csv"));
    store
        .rewrite_all(&catalog(size))
        .expect("Failed to write catalog");
    (dir, store)
}

/// Parse the whole catalog
#[divan::bench(args = SIZES)]
fn load_all(bencher: divan::Bencher, size: usize) {
    let (_dir, store) = populated_store(size);
    bencher.bench_local(|| store.load_all().expect("Load failed"));
}

/// Regenerate the whole catalog file
#[divan::bench(args = SIZES)]
fn rewrite_all(bencher: divan::Bencher, size: usize) {
    let (_dir, store) = populated_store(size);
    let vehicles = catalog(size);
    bencher.bench_local(|| store.rewrite_all(&vehicles).expect("Rewrite failed"));
}

/// Flip one vehicle's availability, as renting and returning do
#[divan::bench(args = SIZES)]
fn update_by_key(bencher: divan::Bencher, size: usize) {
    let (_dir, store) = populated_store(size);
    let mut vehicle = catalog(size).pop().expect("Empty catalog");
    bencher.bench_local(|| {
        vehicle.set_available(!vehicle.is_available());
        store.update_by_key(&vehicle).expect("Update failed")
    });
}
