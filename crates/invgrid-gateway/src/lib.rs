//! Remote table plumbing for the admin engines.
//!
//! [`DataGateway`] is the paginated CRUD contract every entity store talks
//! through; [`MemoryGateway`] is its deterministic in-memory double; and
//! [`TableController`] keeps one page of rows in sync with a
//! [`PaginationTracker`](invgrid_table::PaginationTracker).

mod controller;
mod error;
mod gateway;
mod memory;

pub use controller::TableController;
pub use error::{GatewayError, Result};
pub use gateway::{DataGateway, ListPage, ListRequest, Row, row_id};
pub use memory::MemoryGateway;
