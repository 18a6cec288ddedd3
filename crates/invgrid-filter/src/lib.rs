//! Client-side list filtering for tabular admin views.
//!
//! A [`FilterEngine`] owns the declared filter fields and their current
//! values, applies them (plus a free-text search) to any in-memory
//! collection of [`Record`]s, and coalesces bursts of mutations into one
//! debounced change notification for a refetch coordinator.

mod debounce;
mod engine;
mod error;
mod record;

pub use debounce::Debounce;
pub use engine::{DEFAULT_DEBOUNCE, FilterEngine, FilterSnapshot};
pub use error::{FilterError, Result};
pub use record::{Attr, Record};
