// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::MatcherError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_AIRCRAFT_TABLE: &str = "ICAO_Aircraft.txt";
pub const DEFAULT_AIRLINE_TABLE: &str = "ICAO_Airlines.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftTypeEntry {
    pub manufacturer_code: String,
    pub model_number: String,
    pub model_name: String,
    /// ICAO type designator, e.g. `B738`. Never empty once loaded.
    pub type_designator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineEntry {
    /// ICAO three-letter operator code, used as the callsign prefix.
    pub operator_code: String,
    pub operator_name: String,
    pub country: String,
}

/// The two ICAO lookup tables every match runs against.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub aircraft: Vec<AircraftTypeEntry>,
    pub airlines: Vec<AirlineEntry>,
}

impl ReferenceData {
    /// Loads both tables from disk. Either file missing is fatal.
    pub fn load(aircraft_path: &Path, airline_path: &Path) -> Result<Self, MatcherError> {
        let aircraft = read_aircraft_table(open_table(aircraft_path)?)?;
        let airlines = read_airline_table(open_table(airline_path)?)?;

        if aircraft.is_empty() {
            return Err(MatcherError::EmptyReference(aircraft_path.to_path_buf()));
        }
        if airlines.is_empty() {
            return Err(MatcherError::EmptyReference(airline_path.to_path_buf()));
        }

        log::info!(
            "Loaded reference data: aircraft_types={} airlines={}",
            aircraft.len(),
            airlines.len()
        );
        Ok(Self { aircraft, airlines })
    }
}

fn open_table(path: &Path) -> Result<File, MatcherError> {
    if !path.is_file() {
        return Err(MatcherError::ReferenceNotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

fn tab_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

// Tables in the wild are often Windows-1252; undecodable bytes become U+FFFD.
fn field(record: &csv::ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|b| String::from_utf8_lossy(b).trim().to_string())
        .unwrap_or_default()
}

/// Reads the headerless aircraft table: manufacturer code, model number,
/// model name, ..., type designator (always the last column).
pub fn read_aircraft_table<R: Read>(reader: R) -> Result<Vec<AircraftTypeEntry>, MatcherError> {
    let mut rdr = tab_reader(reader, false);
    let mut entries = Vec::new();

    for result in rdr.byte_records() {
        let record = result?;
        if record.len() < 4 {
            continue;
        }
        let type_designator = field(&record, record.len() - 1);
        if type_designator.is_empty() {
            continue;
        }
        entries.push(AircraftTypeEntry {
            manufacturer_code: field(&record, 0),
            model_number: field(&record, 1),
            model_name: field(&record, 2),
            type_designator,
        });
    }

    Ok(entries)
}

/// Reads the airline table: operator code, operator name, (unused), country.
/// The first row is a header.
pub fn read_airline_table<R: Read>(reader: R) -> Result<Vec<AirlineEntry>, MatcherError> {
    let mut rdr = tab_reader(reader, true);
    let mut entries = Vec::new();

    for result in rdr.byte_records() {
        let record = result?;
        let operator_code = field(&record, 0);
        if operator_code.is_empty() {
            continue;
        }
        entries.push(AirlineEntry {
            operator_code,
            operator_name: field(&record, 1),
            country: field(&record, 3),
        });
    }

    Ok(entries)
}
