//! CSV-backed record store
//!
//! One `CsvStore` owns one collection file. Reads stream rows through
//! `csv::Reader` and convert them with `Record::from_record`; every write
//! regenerates the whole file.
//!
//! # Atomic Rewrites
//!
//! A rewrite goes to a temporary file in the same directory which is then
//! renamed over the collection file. A reader therefore sees either the old or
//! the new contents, never a half-written file.
//!
//! # Error Handling
//!
//! - A missing file loads as an empty collection
//! - The first malformed row fails the load, with its line number

use crate::core::traits::{Record, RecordStore};
use crate::types::RentalError;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Record store backed by a single CSV file
#[derive(Debug, Clone)]
pub struct CsvStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> CsvStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the collection file (and its temporary rewrites)
    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }
}

impl<T: Record> RecordStore<T> for CsvStore<T> {
    fn ensure_initialized(&self) -> Result<(), RentalError> {
        fs::create_dir_all(self.directory())?;

        // create_new never truncates an existing collection
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(T::HEADER)?;
        writer.flush()?;

        info!(
            collection = T::COLLECTION,
            path = %self.path.display(),
            "created collection file"
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<T>, RentalError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    collection = T::COLLECTION,
                    path = %self.path.display(),
                    "collection file missing, treating as empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = result?;
            let line = raw.position().map(|pos| pos.line()).unwrap_or_default();

            let row: T::Row = raw
                .deserialize(Some(&headers))
                .map_err(|e| RentalError::from(e).at_line(line))?;
            records.push(T::from_record(row).map_err(|e| e.at_line(line))?);
        }

        Ok(records)
    }

    fn rewrite_all(&self, records: &[T]) -> Result<(), RentalError> {
        let directory = self.directory();
        fs::create_dir_all(directory)?;

        let mut temp = NamedTempFile::new_in(directory)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer.write_record(T::HEADER)?;
            for record in records {
                writer.serialize(record.to_record())?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!(
            collection = T::COLLECTION,
            rows = records.len(),
            path = %self.path.display(),
            "rewrote collection"
        );
        Ok(())
    }
}
