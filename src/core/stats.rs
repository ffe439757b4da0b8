//! Statistics over a record collection
//!
//! Five independent reports, each a pure function of the input collection.
//! Mode ties always break toward the smallest value: the lowest-numbered
//! month/day/hour, the earliest year, or the lexicographically first station.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::core::types::RecordCollection;
use crate::error::AppError;

/// Most frequent travel times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimeStats {
    pub(crate) month: u32,
    /// Day of month (1-31), not day of week. The product report has always
    /// shown the calendar day here; the weekday only drives filtering.
    pub(crate) day_of_month: u32,
    pub(crate) hour: u32,
}

/// Most frequent stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StationStats {
    pub(crate) start: String,
    pub(crate) end: String,
    /// Start and end names pooled into one namespace; a station seen only on
    /// one side counts zero on the other.
    pub(crate) combined: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DurationStats {
    pub(crate) total: f64,
    pub(crate) mean: f64,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenderStats {
    /// Descending count, ties by name.
    pub(crate) counts: Vec<(String, usize)>,
    pub(crate) missing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BirthYearStats {
    pub(crate) earliest: i32,
    pub(crate) most_recent: i32,
    pub(crate) most_common: i32,
    pub(crate) missing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserStats {
    /// Descending count, ties by name.
    pub(crate) user_types: Vec<(String, usize)>,
    /// Present iff the source schema carries a gender column.
    pub(crate) genders: Option<GenderStats>,
    /// Present iff the source schema carries a birth-year column with at
    /// least one populated cell.
    pub(crate) birth_years: Option<BirthYearStats>,
}

/// `describe()`-style summary of one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldSummary {
    pub(crate) field: &'static str,
    pub(crate) count: usize,
    pub(crate) mean: f64,
    pub(crate) std: f64,
    pub(crate) min: f64,
    pub(crate) q1: f64,
    pub(crate) median: f64,
    pub(crate) q3: f64,
    pub(crate) max: f64,
}

/// Mode with smallest-value tie-breaking.
fn mode<T: Eq + Ord + Hash>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(v, _)| v)
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Report 1: most frequent month, day of month, and start hour.
pub(crate) fn time_stats(collection: &RecordCollection) -> Option<TimeStats> {
    let records = &collection.records;
    Some(TimeStats {
        month: mode(records.iter().map(|r| r.month))?,
        day_of_month: mode(records.iter().map(|r| r.day_of_month))?,
        hour: mode(records.iter().map(|r| r.hour))?,
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct StationTally {
    starts: usize,
    ends: usize,
}

impl StationTally {
    fn combined(self) -> usize {
        self.starts + self.ends
    }
}

fn station_tallies(collection: &RecordCollection) -> HashMap<&str, StationTally> {
    let mut tallies: HashMap<&str, StationTally> = HashMap::new();
    for r in &collection.records {
        tallies.entry(r.start_station.as_str()).or_default().starts += 1;
        tallies.entry(r.end_station.as_str()).or_default().ends += 1;
    }
    tallies
}

/// Report 2: most frequent start, end, and pooled station.
pub(crate) fn station_stats(collection: &RecordCollection) -> Option<StationStats> {
    let records = &collection.records;
    let start = mode(records.iter().map(|r| r.start_station.as_str()))?;
    let end = mode(records.iter().map(|r| r.end_station.as_str()))?;
    let combined = station_tallies(collection)
        .into_iter()
        .max_by(|(sa, ta), (sb, tb)| {
            ta.combined()
                .cmp(&tb.combined())
                .then_with(|| sb.cmp(sa))
        })
        .map(|(s, _)| s)?;
    Some(StationStats {
        start: start.to_string(),
        end: end.to_string(),
        combined: combined.to_string(),
    })
}

/// Report 3: total and mean trip duration. The only report that refuses an
/// empty scope; a zero or NaN here would read as a real statistic.
pub(crate) fn duration_stats(collection: &RecordCollection) -> Result<DurationStats, AppError> {
    if collection.is_empty() {
        return Err(AppError::InsufficientData);
    }
    let count = collection.len();
    let total: f64 = collection.records.iter().map(|r| r.trip_duration).sum();
    Ok(DurationStats {
        total,
        mean: total / count as f64,
        count,
    })
}

/// Report 4: user-type counts plus the gender/birth-year sub-reports the
/// source schema supports.
pub(crate) fn user_stats(collection: &RecordCollection) -> Option<UserStats> {
    if collection.is_empty() {
        return None;
    }

    let mut type_counts: HashMap<&str, usize> = HashMap::new();
    for r in &collection.records {
        *type_counts.entry(r.user_type.as_str()).or_default() += 1;
    }

    let genders = collection.caps.has_gender.then(|| {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut missing = 0;
        for r in &collection.records {
            match r.gender.as_deref() {
                Some(g) => *counts.entry(g).or_default() += 1,
                None => missing += 1,
            }
        }
        GenderStats {
            counts: sorted_counts(counts),
            missing,
        }
    });

    let birth_years = if collection.caps.has_birth_year {
        let years: Vec<i32> = collection.records.iter().filter_map(|r| r.birth_year).collect();
        let missing = collection.len() - years.len();
        years.iter().copied().min().map(|earliest| BirthYearStats {
            earliest,
            most_recent: years.iter().copied().max().unwrap_or(earliest),
            most_common: mode(years.iter().copied()).unwrap_or(earliest),
            missing,
        })
    } else {
        None
    };

    Some(UserStats {
        user_types: sorted_counts(type_counts),
        genders,
        birth_years,
    })
}

/// Report 5: descriptive summary of every numeric field in the schema.
pub(crate) fn describe(collection: &RecordCollection) -> Option<Vec<FieldSummary>> {
    if collection.is_empty() {
        return None;
    }
    let records = &collection.records;
    let mut out = vec![
        summarize(
            "Trip Duration",
            records.iter().map(|r| r.trip_duration).collect(),
        ),
        summarize("Month", records.iter().map(|r| r.month as f64).collect()),
        summarize(
            "Day",
            records.iter().map(|r| r.day_of_month as f64).collect(),
        ),
        summarize("Hour", records.iter().map(|r| r.hour as f64).collect()),
    ];
    if collection.caps.has_birth_year {
        let years: Vec<f64> = records
            .iter()
            .filter_map(|r| r.birth_year)
            .map(f64::from)
            .collect();
        if !years.is_empty() {
            out.push(summarize("Birth Year", years));
        }
    }
    Some(out)
}

fn summarize(field: &'static str, mut values: Vec<f64>) -> FieldSummary {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        // Sample standard deviation (n-1).
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    FieldSummary {
        field,
        count,
        mean,
        std,
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty and
/// ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
