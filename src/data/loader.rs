//! Record store loader
//!
//! Reads one city's trip CSV into a `RecordCollection`, deriving the calendar
//! fields from each start timestamp. A malformed row fails the whole load;
//! partial statistics would silently mislead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::core::filter::filter;
use crate::core::types::{DayFilter, MonthFilter, RecordCollection, SchemaCaps, TripRecord};
use crate::error::AppError;

/// Immutable city-to-file mapping handed to the loader; built once from
/// configuration, never a module-level global.
#[derive(Debug, Clone)]
pub(crate) struct CityMap {
    entries: BTreeMap<String, PathBuf>,
}

impl CityMap {
    pub(crate) fn new(entries: BTreeMap<String, PathBuf>) -> Self {
        CityMap { entries }
    }

    /// City keys in sorted order, for prompting and validation.
    pub(crate) fn cities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    fn path(&self, city: &str) -> Option<&Path> {
        self.entries.get(city).map(PathBuf::as_path)
    }
}

struct Columns {
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

fn resolve_columns(headers: &StringRecord, path: &Path) -> Result<Columns, AppError> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        find(name).ok_or_else(|| AppError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    };
    Ok(Columns {
        start_time: require("Start Time")?,
        end_time: require("End Time")?,
        trip_duration: require("Trip Duration")?,
        start_station: require("Start Station")?,
        end_station: require("End Station")?,
        user_type: require("User Type")?,
        gender: find("Gender"),
        birth_year: find("Birth Year"),
    })
}

/// Load a city's full record collection with derived fields populated.
pub(crate) fn load(city: &str, map: &CityMap) -> Result<RecordCollection, AppError> {
    let path = map.path(city).ok_or_else(|| AppError::InvalidSelection {
        input: city.to_string(),
        expected: map.cities().collect::<Vec<_>>().join(", "),
    })?;
    if !path.exists() {
        return Err(AppError::MissingDataFile {
            city: city.to_string(),
            path: path.to_path_buf(),
        });
    }

    let csv_err = |source| AppError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = resolve_columns(&headers, path)?;
    let caps = SchemaCaps {
        has_gender: columns.gender.is_some(),
        has_birth_year: columns.birth_year.is_some(),
    };

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        // 1-based file line, counting the header.
        let line = i as u64 + 2;
        records.push(parse_record(&row, &columns, path, line)?);
    }
    Ok(RecordCollection::new(records, caps))
}

/// Load and filter in one step; the two stages stay separable for testing.
pub(crate) fn load_filtered(
    city: &str,
    map: &CityMap,
    month: MonthFilter,
    day: DayFilter,
) -> Result<RecordCollection, AppError> {
    Ok(filter(&load(city, map)?, month, day))
}

fn field<'r>(row: &'r StringRecord, idx: usize) -> &'r str {
    row.get(idx).unwrap_or("")
}

fn parse_timestamp(input: &str, path: &Path, row: u64) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTimestamp {
            path: path.to_path_buf(),
            row,
            input: input.to_string(),
        })
}

fn invalid_field(path: &Path, row: u64, column: &str, input: &str) -> AppError {
    AppError::InvalidField {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        input: input.to_string(),
    }
}

/// Birth years arrive float-formatted in some sources ("1992.0").
fn parse_birth_year(input: &str, path: &Path, row: u64) -> Result<Option<i32>, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| invalid_field(path, row, "Birth Year", input))?;
    if value.fract() != 0.0 || !(1800.0..=2100.0).contains(&value) {
        return Err(invalid_field(path, row, "Birth Year", input));
    }
    Ok(Some(value as i32))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_record(
    row: &StringRecord,
    columns: &Columns,
    path: &Path,
    line: u64,
) -> Result<TripRecord, AppError> {
    let start_time = parse_timestamp(field(row, columns.start_time), path, line)?;
    let end_time = parse_timestamp(field(row, columns.end_time), path, line)?;

    let duration_raw = field(row, columns.trip_duration);
    let trip_duration: f64 = duration_raw
        .trim()
        .parse()
        .map_err(|_| invalid_field(path, line, "Trip Duration", duration_raw))?;
    if !trip_duration.is_finite() || trip_duration < 0.0 {
        return Err(invalid_field(path, line, "Trip Duration", duration_raw));
    }

    let gender = columns.gender.and_then(|i| non_empty(field(row, i)));
    let birth_year = match columns.birth_year {
        Some(i) => parse_birth_year(field(row, i), path, line)?,
        None => None,
    };

    Ok(TripRecord::new(
        start_time,
        end_time,
        field(row, columns.start_station).to_string(),
        field(row, columns.end_station).to_string(),
        trip_duration,
        field(row, columns.user_type).to_string(),
        gender,
        birth_year,
    ))
}
