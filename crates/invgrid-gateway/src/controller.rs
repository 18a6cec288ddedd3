//! Fetch coordination between a gateway and the pagination tracker.

use invgrid_table::{PaginationTracker, PageWindow};

use crate::error::GatewayError;
use crate::gateway::{DataGateway, ListRequest, Row};

/// Owns a [`DataGateway`] and a [`PaginationTracker`] and keeps the
/// current page of rows in sync with them.
///
/// Fetch failures never propagate: the rows are cleared, the total
/// zeroed, and the error parked in [`last_error`] for the UI to surface
/// next to the loading flag.
///
/// [`last_error`]: TableController::last_error
pub struct TableController<G: DataGateway> {
    gateway: G,
    tracker: PaginationTracker,
    rows: Vec<Row>,
    last_error: Option<GatewayError>,
}

impl<G: DataGateway> TableController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tracker: PaginationTracker::new(),
            rows: Vec::new(),
            last_error: None,
        }
    }

    /// Replace the stock tracker, e.g. to change page size or default sort.
    #[must_use]
    pub fn with_tracker(mut self, tracker: PaginationTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn tracker(&self) -> &PaginationTracker {
        &self.tracker
    }

    pub fn loading(&self) -> bool {
        self.tracker.loading()
    }

    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }

    pub fn pagination_info(&self) -> PageWindow {
        self.tracker.pagination_info()
    }

    /// Fetch the current page. When the reported total clamps the page
    /// down (rows disappeared under us), the surviving page is fetched
    /// in the same call.
    pub async fn refresh(&mut self) {
        self.tracker.set_loading(true);
        self.last_error = None;

        let mut attempts = 0;
        loop {
            let page = self.tracker.current_page();
            let request = self.page_request(page);
            match self.gateway.list(&request).await {
                Ok(fetched) => {
                    self.rows = fetched.rows;
                    self.tracker.set_total_items(fetched.total);
                }
                Err(error) => {
                    tracing::warn!(%error, page, "page fetch failed");
                    self.rows.clear();
                    self.tracker.set_total_items(0);
                    self.last_error = Some(error);
                    break;
                }
            }
            if self.tracker.current_page() == page || attempts >= 1 {
                break;
            }
            attempts += 1;
        }

        self.tracker.set_loading(false);
    }

    /// Move to a page and refetch.
    pub async fn set_page(&mut self, page: usize) {
        self.tracker.handle_page_change(page);
        self.refresh().await;
    }

    /// Select a sort column (toggling direction on reselect) and refetch.
    pub async fn set_sort(&mut self, key: &str) {
        self.tracker.handle_sort_change(key);
        self.refresh().await;
    }

    /// Restore page/sort defaults and refetch.
    pub async fn reset(&mut self) {
        self.tracker.reset();
        self.refresh().await;
    }

    fn page_request(&self, page: usize) -> ListRequest {
        let size = self.tracker.page_size();
        let mut request = ListRequest::page((page - 1) * size, size);
        if !self.tracker.sort_by().is_empty() {
            request = request.with_sort(self.tracker.sort_by(), self.tracker.sort_order());
        }
        request
    }
}
