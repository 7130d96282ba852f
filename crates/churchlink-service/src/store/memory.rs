//! In-memory page and navigation store.
//!
//! Used by tests and by the CLI's offline mode, where it is loaded from and
//! written back to a JSON snapshot. Enforces the same revision check as
//! the backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use churchlink_core::error::AppError;
use churchlink_core::result::AppResult;
use churchlink_core::types::{ListRequest, ListResponse};
use churchlink_entity::navigation::{FooterSection, HeaderItem};
use churchlink_entity::page::{EditState, Page, PageSummary, SaveReceipt};
use churchlink_entity::store::{NavigationStore, PageStore};

/// Serializable contents of a [`MemoryPageStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Staging copies.
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Published copies.
    #[serde(default)]
    pub live: Vec<Page>,
    #[serde(default)]
    pub header: Vec<HeaderItem>,
    #[serde(default)]
    pub footer: Vec<FooterSection>,
}

/// Store backed by concurrent maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    staging: Arc<DashMap<String, Page>>,
    live: Arc<DashMap<String, Page>>,
    header: Arc<RwLock<Vec<HeaderItem>>>,
    footer: Arc<RwLock<Vec<FooterSection>>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        for page in snapshot.pages {
            store.staging.insert(page.slug.clone(), page);
        }
        for page in snapshot.live {
            store.live.insert(page.slug.clone(), page);
        }
        Self {
            header: Arc::new(RwLock::new(snapshot.header)),
            footer: Arc::new(RwLock::new(snapshot.footer)),
            ..store
        }
    }

    /// Capture the current contents, pages sorted by slug.
    pub async fn snapshot(&self) -> Snapshot {
        Snapshot {
            pages: sorted(&self.staging),
            live: sorted(&self.live),
            header: self.header.read().await.clone(),
            footer: self.footer.read().await.clone(),
        }
    }

    /// Put a staging page in place without a revision check.
    pub fn seed(&self, page: Page) {
        self.staging.insert(page.slug.clone(), page);
    }
}

fn sorted(map: &DashMap<String, Page>) -> Vec<Page> {
    let mut pages: Vec<Page> = map.iter().map(|entry| entry.value().clone()).collect();
    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    pages
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn fetch_page(&self, slug: &str, state: EditState) -> AppResult<Page> {
        let map = match state {
            EditState::Staging | EditState::Preview => &self.staging,
            EditState::Live => &self.live,
        };
        map.get(slug)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Page '{slug}' ({state}) not found")))
    }

    async fn save_staging(&self, page: &Page, expected_revision: u64) -> AppResult<SaveReceipt> {
        let entry = self.staging.entry(page.slug.clone());
        let current = match &entry {
            Entry::Occupied(existing) => existing.get().revision,
            Entry::Vacant(_) => 0,
        };
        if current != expected_revision {
            return Err(AppError::conflict(format!(
                "Page '{}' is at revision {current}, save was based on {expected_revision}",
                page.slug
            )));
        }

        let mut stored = page.clone();
        stored.revision = current + 1;
        stored.updated_at = Some(Utc::now());
        let receipt = SaveReceipt {
            revision: stored.revision,
            updated_at: stored.updated_at,
        };
        entry.insert(stored);
        debug!(slug = %page.slug, revision = receipt.revision, "Stored staging page");
        Ok(receipt)
    }

    async fn publish(&self, slug: &str) -> AppResult<()> {
        let page = self
            .staging
            .get(slug)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Page '{slug}' not found")))?;
        self.live.insert(slug.to_string(), page);
        Ok(())
    }

    async fn list_pages(
        &self,
        search: Option<&str>,
        request: &ListRequest,
    ) -> AppResult<ListResponse<PageSummary>> {
        let needle = search.map(str::to_lowercase).unwrap_or_default();
        let matches: Vec<PageSummary> = sorted(&self.staging)
            .iter()
            .filter(|page| {
                needle.is_empty()
                    || page.slug.to_lowercase().contains(&needle)
                    || page.title.to_lowercase().contains(&needle)
            })
            .map(Page::summary)
            .collect();
        Ok(ListResponse::from_all(matches, request))
    }
}

#[async_trait]
impl NavigationStore for MemoryPageStore {
    async fn header_items(&self) -> AppResult<Vec<HeaderItem>> {
        Ok(self.header.read().await.clone())
    }

    async fn save_header_items(&self, items: &[HeaderItem]) -> AppResult<()> {
        *self.header.write().await = items.to_vec();
        Ok(())
    }

    async fn footer_sections(&self) -> AppResult<Vec<FooterSection>> {
        Ok(self.footer.read().await.clone())
    }

    async fn save_footer_section(&self, section: &FooterSection) -> AppResult<()> {
        let mut footer = self.footer.write().await;
        let existing = footer
            .iter_mut()
            .find(|s| s.title == section.title)
            .ok_or_else(|| {
                AppError::not_found(format!("Footer section '{}' not found", section.title))
            })?;
        *existing = section.clone();
        Ok(())
    }
}
