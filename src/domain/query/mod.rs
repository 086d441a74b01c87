//! Property search: filtering, sorting and pagination over a scanned record set.

pub mod filter;
pub mod params;
pub mod processor;
pub mod sort;

pub use filter::{PropertyFilter, TextMatch};
pub use params::{QueryParameters, SortOrder, DEFAULT_LIMIT};
pub use processor::{QueryPage, QueryProcessor};
pub use sort::ResultSorter;
