/// Rows per raw-data page.
pub(crate) const PAGE_SIZE: usize = 5;

/// Month selectors accepted by the filter; the source datasets only cover
/// January through June.
pub(crate) const MONTH_NAMES: [&str; 6] = [
    "january", "february", "march", "april", "may", "june",
];

pub(crate) const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
