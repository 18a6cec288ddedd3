//! Authoritative client-side page and sort state.

use serde::Serialize;

use invgrid_model::{SortOrder, SortSpec};

/// 1-based display window over the full record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

type PageCallback = Box<dyn FnMut(usize)>;
type SortCallback = Box<dyn FnMut(&SortSpec)>;

/// Tracks the current page, page size, total count, and column sort for
/// one table view, and tells an external coordinator when to refetch.
///
/// The tracker never fetches data itself. Page changes always notify —
/// including a change to the numerically same page; sort changes notify
/// only while a sort key is set.
pub struct PaginationTracker {
    current_page: usize,
    page_size: usize,
    total_items: usize,
    sort_by: String,
    sort_desc: bool,
    loading: bool,
    default_page: usize,
    default_sort_by: String,
    default_sort_desc: bool,
    on_page_change: Option<PageCallback>,
    on_sort_change: Option<SortCallback>,
}

impl Default for PaginationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationTracker {
    /// Tracker with the stock defaults: page 1, 10 rows per page, no sort.
    pub fn new() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            total_items: 0,
            sort_by: String::new(),
            sort_desc: false,
            loading: false,
            default_page: 1,
            default_sort_by: String::new(),
            default_sort_desc: false,
            on_page_change: None,
            on_sort_change: None,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Starting page, also the page `reset` returns to.
    #[must_use]
    pub fn with_default_page(mut self, page: usize) -> Self {
        self.default_page = page.max(1);
        self.current_page = self.default_page;
        self
    }

    /// Starting sort, also the sort `reset` returns to.
    #[must_use]
    pub fn with_default_sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.default_sort_by = key.into();
        self.default_sort_desc = order.is_descending();
        self.sort_by = self.default_sort_by.clone();
        self.sort_desc = self.default_sort_desc;
        self
    }

    #[must_use]
    pub fn with_on_page_change(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn with_on_sort_change(mut self, callback: impl FnMut(&SortSpec) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(callback));
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn sort_desc(&self) -> bool {
        self.sort_desc
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_descending(self.sort_desc)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Move to a page. Notifies on every call — the coordinator decides
    /// whether a refetch for the same page is worth skipping.
    pub fn handle_page_change(&mut self, page: usize) {
        self.current_page = page.max(1);
        let page = self.current_page;
        if let Some(callback) = &mut self.on_page_change {
            callback(page);
        }
    }

    /// Select a sort column: reselecting the current key flips direction,
    /// a new key starts ascending. Notifies unless the key is empty.
    pub fn handle_sort_change(&mut self, key: &str) {
        if self.sort_by == key {
            self.sort_desc = !self.sort_desc;
        } else {
            self.sort_by = key.to_string();
            self.sort_desc = false;
        }
        if self.sort_by.is_empty() {
            return;
        }
        let spec = SortSpec::new(self.sort_by.clone(), self.sort_order());
        if let Some(callback) = &mut self.on_sort_change {
            callback(&spec);
        }
    }

    /// Record the collection size reported by the data source. When the
    /// current page now lies past the last page, it is clamped down (and
    /// the page callback fires so the coordinator refetches). A total of
    /// zero leaves the current page untouched.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        if self.total_items > 0 && self.current_page > self.total_pages() {
            tracing::debug!(
                page = self.current_page,
                total_pages = self.total_pages(),
                "clamping page after shrink"
            );
            self.handle_page_change(self.total_pages());
        }
    }

    /// Restore page and sort to their construction-time defaults. Total
    /// count and page size are left as they are.
    pub fn reset(&mut self) {
        self.current_page = self.default_page;
        self.sort_by = self.default_sort_by.clone();
        self.sort_desc = self.default_sort_desc;
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// The 1-based `start`-`end` of `total` display window.
    pub fn pagination_info(&self) -> PageWindow {
        let raw_start = (self.current_page - 1) * self.page_size + 1;
        PageWindow {
            start: if self.total_items > 0 { raw_start } else { 0 },
            end: (raw_start + self.page_size - 1).min(self.total_items),
            total: self.total_items,
        }
    }
}
