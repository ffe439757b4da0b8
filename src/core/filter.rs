//! Month/day subselection over a record collection.

use crate::core::types::{DayFilter, MonthFilter, RecordCollection};

/// Stable AND of the month and day predicates. `All` is the identity on both
/// axes, surviving records keep their relative order, and an empty result is a
/// valid collection.
pub(crate) fn filter(
    collection: &RecordCollection,
    month: MonthFilter,
    day: DayFilter,
) -> RecordCollection {
    let records = collection
        .records
        .iter()
        .filter(|r| month.matches(r.month) && day.matches(r.day_of_week))
        .cloned()
        .collect();
    RecordCollection::new(records, collection.caps)
}
