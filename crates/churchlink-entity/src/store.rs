//! Persistence traits for pages and navigation.
//!
//! Implemented by the REST client and by the in-memory store used in tests
//! and offline mode.

use async_trait::async_trait;
use churchlink_core::result::AppResult;
use churchlink_core::types::{ListRequest, ListResponse};

use crate::navigation::{FooterSection, HeaderItem};
use crate::page::{EditState, Page, PageSummary, SaveReceipt};

/// Page documents addressed by slug.
#[async_trait]
pub trait PageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load one copy of a page.
    async fn fetch_page(&self, slug: &str, state: EditState) -> AppResult<Page>;

    /// Store the staging copy.
    ///
    /// `expected_revision` is the revision the edit was based on. A store
    /// holding any other revision rejects the save with a conflict error.
    async fn save_staging(&self, page: &Page, expected_revision: u64) -> AppResult<SaveReceipt>;

    /// Copy the staging copy over the live one.
    async fn publish(&self, slug: &str) -> AppResult<()>;

    /// List pages whose title or slug contains `search`.
    async fn list_pages(
        &self,
        search: Option<&str>,
        request: &ListRequest,
    ) -> AppResult<ListResponse<PageSummary>>;
}

/// Header and footer navigation.
#[async_trait]
pub trait NavigationStore: Send + Sync + std::fmt::Debug + 'static {
    /// All header entries in display order.
    async fn header_items(&self) -> AppResult<Vec<HeaderItem>>;

    /// Replace the header entries.
    async fn save_header_items(&self, items: &[HeaderItem]) -> AppResult<()>;

    /// All footer sections in display order.
    async fn footer_sections(&self) -> AppResult<Vec<FooterSection>>;

    /// Replace the footer section titled `section.title`.
    async fn save_footer_section(&self, section: &FooterSection) -> AppResult<()>;
}
