//! Loading, saving, publishing and searching pages.

use std::sync::Arc;

use churchlink_core::result::AppResult;
use churchlink_core::types::{ListRequest, ListResponse, LocaleCode};
use churchlink_entity::page::{EditState, Page, PageSummary, SaveReceipt};
use churchlink_entity::store::PageStore;
use tracing::{info, warn};

use crate::editor::EditorSession;
use crate::localization::{BackfillReport, LocalizationService};
use crate::sequence::LatestOnly;

/// Page operations over a [`PageStore`].
#[derive(Debug, Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,
    localization: LocalizationService,
    max_undo_steps: usize,
}

impl PageService {
    pub fn new(
        store: Arc<dyn PageStore>,
        localization: LocalizationService,
        max_undo_steps: usize,
    ) -> Self {
        Self {
            store,
            localization,
            max_undo_steps,
        }
    }

    /// Open the staging copy for editing.
    pub async fn open(&self, slug: &str) -> AppResult<EditorSession> {
        let page = self.store.fetch_page(slug, EditState::Staging).await?;
        info!(slug, revision = page.revision, "Opened page for editing");
        Ok(EditorSession::new(page, self.max_undo_steps))
    }

    /// Fetch the staging copy rendered for preview.
    pub async fn preview(&self, slug: &str) -> AppResult<Page> {
        self.store.fetch_page(slug, EditState::Preview).await
    }

    /// Fetch the published copy.
    pub async fn live(&self, slug: &str) -> AppResult<Page> {
        self.store.fetch_page(slug, EditState::Live).await
    }

    /// Fetch any copy.
    pub async fn fetch(&self, slug: &str, state: EditState) -> AppResult<Page> {
        self.store.fetch_page(slug, state).await
    }

    /// Store the session's page as the new staging copy.
    ///
    /// The save is based on the revision the session was opened (or last
    /// saved) at. If someone else saved in between, the store reports a
    /// conflict and the session keeps its unsaved changes.
    pub async fn save(&self, session: &mut EditorSession) -> AppResult<SaveReceipt> {
        session.require_dirty()?;
        let expected = session.base_revision();
        match self.store.save_staging(session.page(), expected).await {
            Ok(receipt) => {
                session.mark_saved(&receipt);
                info!(slug = session.slug(), revision = receipt.revision, "Saved page");
                Ok(receipt)
            }
            Err(err) => {
                if err.is_conflict() {
                    warn!(
                        slug = session.slug(),
                        expected,
                        "Save rejected: page changed since it was opened"
                    );
                }
                Err(err)
            }
        }
    }

    /// Replace the staging copy of an existing page with `page`, based on
    /// the currently stored revision.
    pub async fn import(&self, page: Page) -> AppResult<SaveReceipt> {
        let mut session = self.open(&page.slug).await?;
        let mut incoming = page;
        incoming.revision = session.base_revision();
        session.replace(incoming);
        self.save(&mut session).await
    }

    /// Copy the staging copy over the live one.
    pub async fn publish(&self, slug: &str) -> AppResult<()> {
        self.store.publish(slug).await?;
        info!(slug, "Published page");
        Ok(())
    }

    /// List pages, optionally filtered by a search string.
    pub async fn list(
        &self,
        search: Option<&str>,
        request: &ListRequest,
    ) -> AppResult<ListResponse<PageSummary>> {
        self.store.list_pages(search, request).await
    }

    /// Run a listing whose result is only kept if no newer search was
    /// started meanwhile. Returns whether this result was kept.
    pub async fn search(
        &self,
        results: &LatestOnly<ListResponse<PageSummary>>,
        search: Option<&str>,
        request: &ListRequest,
    ) -> AppResult<bool> {
        let ticket = results.issue();
        let listing = self.list(search, request).await?;
        Ok(results.complete(ticket, listing))
    }

    /// Backfill `locales` into the session's page as one undoable edit.
    pub async fn backfill(
        &self,
        session: &mut EditorSession,
        locales: &[LocaleCode],
    ) -> AppResult<BackfillReport> {
        let (page, report) = self
            .localization
            .ensure_page_locale(session.page(), locales)
            .await?;
        if report.changed() {
            session.replace(page);
        }
        Ok(report)
    }
}
