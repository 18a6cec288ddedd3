//! Client-side page/sort bookkeeping for remote paginated tables.
//!
//! A [`PaginationTracker`] owns the current page, page size, total count,
//! and column sort for one table view, derives the page arithmetic, and
//! notifies an external coordinator when a refetch is due. It never
//! fetches data itself.

mod tracker;

pub use tracker::{PageWindow, PaginationTracker};
