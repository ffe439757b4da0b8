//! The filtering-and-aggregation pipeline: types, filter engine, statistics
//! engine, and the raw-data paginator. Everything here is pure and I/O-free.

pub(crate) mod filter;
pub(crate) mod paginate;
pub(crate) mod stats;
pub(crate) mod types;
