//! Pagination types for list endpoints.
//!
//! Named `List*` rather than `Page*` so they never get confused with the
//! web-builder `Page` entity.

use serde::{Deserialize, Serialize};

/// Default number of items per list page.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum number of items per list page.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl ListRequest {
    /// Create a new list request, clamping out-of-range values.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of matching items across all pages.
    pub total_items: u64,
}

impl<T> ListResponse<T> {
    /// Slice an already-filtered collection according to `request`.
    pub fn from_all(all: Vec<T>, request: &ListRequest) -> Self {
        let total_items = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.page_size).unwrap_or(usize::MAX))
            .collect();
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
        }
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_items.div_ceil(self.page_size)
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let req = ListRequest::new(0, 1000);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_from_all_slices_second_page() {
        let req = ListRequest::new(2, 2);
        let resp = ListResponse::from_all(vec![1, 2, 3, 4, 5], &req);
        assert_eq!(resp.items, vec![3, 4]);
        assert_eq!(resp.total_items, 5);
        assert_eq!(resp.total_pages(), 3);
    }

    #[test]
    fn test_from_all_past_end_is_empty() {
        let req = ListRequest::new(9, 10);
        let resp = ListResponse::from_all(vec!["a"], &req);
        assert!(resp.items.is_empty());
        assert_eq!(resp.total_pages(), 1);
    }

    #[test]
    fn test_huge_page_number_is_empty() {
        let req = ListRequest::new(u64::MAX, 25);
        assert_eq!(req.offset(), u64::MAX);
        let resp = ListResponse::from_all(vec![1, 2, 3], &req);
        assert!(resp.items.is_empty());
        assert_eq!(resp.total_items, 3);
    }
}
