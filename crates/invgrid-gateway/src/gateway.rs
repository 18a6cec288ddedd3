//! The remote tabular CRUD contract every entity store talks through.

use async_trait::async_trait;
use serde_json::Value;

use invgrid_model::{SortOrder, SortSpec};

use crate::error::Result;

/// One table row, as the remote endpoint speaks it.
pub type Row = serde_json::Map<String, Value>;

/// A paginated list request: a half-open window over the sorted table.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub offset: usize,
    pub limit: usize,
    pub sort: Option<SortSpec>,
    /// Column projection; `None` selects everything.
    pub columns: Option<Vec<String>>,
}

impl ListRequest {
    pub fn page(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(key, order));
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// One page of rows plus the exact total count of the whole collection.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub rows: Vec<Row>,
    pub total: usize,
}

/// Remote paginated CRUD endpoint for one table. All operations are
/// asynchronous and fail with a [`GatewayError`] the caller surfaces
/// through its own loading/error pair.
///
/// [`GatewayError`]: crate::GatewayError
#[async_trait(?Send)]
pub trait DataGateway {
    async fn list(&self, request: &ListRequest) -> Result<ListPage>;
    async fn get_by_id(&self, id: &str) -> Result<Row>;
    async fn insert(&self, row: Row) -> Result<Row>;
    async fn update(&self, id: &str, patch: Row) -> Result<Row>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// The row's `id` attribute rendered as a string, however the endpoint
/// typed it.
pub fn row_id(row: &Row) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
