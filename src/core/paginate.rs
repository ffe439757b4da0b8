//! Sequential fixed-size windows over a filtered collection.

use crate::consts::PAGE_SIZE;
use crate::core::types::{RecordCollection, TripRecord};

/// Cursor over one record collection. Each instance owns its offset, so two
/// pagers over the same collection advance independently. Single consumer;
/// not thread-safe by design.
#[derive(Debug)]
pub(crate) struct RawDataPager<'a> {
    records: &'a [TripRecord],
    offset: usize,
}

impl<'a> RawDataPager<'a> {
    pub(crate) fn new(collection: &'a RecordCollection) -> Self {
        RawDataPager {
            records: &collection.records,
            offset: 0,
        }
    }

    /// Up to [`PAGE_SIZE`] records, advancing the cursor; empty once the
    /// collection is exhausted, and on every call after that.
    pub(crate) fn next_page(&mut self) -> &'a [TripRecord] {
        let start = self.offset.min(self.records.len());
        let end = (start + PAGE_SIZE).min(self.records.len());
        self.offset = end;
        &self.records[start..end]
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.offset >= self.records.len()
    }
}
