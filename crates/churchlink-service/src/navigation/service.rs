//! Header and footer loading, saving and backfill.

use std::sync::Arc;

use churchlink_core::result::AppResult;
use churchlink_core::types::LocaleCode;
use churchlink_entity::navigation::{FooterSection, HeaderItem};
use churchlink_entity::store::NavigationStore;
use tracing::info;

use crate::localization::{BackfillReport, LocalizationService};

/// Navigation operations over a [`NavigationStore`].
#[derive(Debug, Clone)]
pub struct NavigationService {
    store: Arc<dyn NavigationStore>,
    localization: LocalizationService,
}

impl NavigationService {
    pub fn new(store: Arc<dyn NavigationStore>, localization: LocalizationService) -> Self {
        Self {
            store,
            localization,
        }
    }

    pub async fn header(&self) -> AppResult<Vec<HeaderItem>> {
        self.store.header_items().await
    }

    pub async fn save_header(&self, items: &[HeaderItem]) -> AppResult<()> {
        self.store.save_header_items(items).await
    }

    pub async fn footer(&self) -> AppResult<Vec<FooterSection>> {
        self.store.footer_sections().await
    }

    /// Save footer sections one by one, as the backend addresses them by
    /// title.
    pub async fn save_footer(&self, sections: &[FooterSection]) -> AppResult<()> {
        for section in sections {
            self.store.save_footer_section(section).await?;
        }
        Ok(())
    }

    /// Load the header, fill `locales`, and save it unless `dry_run`.
    pub async fn backfill_header(
        &self,
        locales: &[LocaleCode],
        dry_run: bool,
    ) -> AppResult<(Vec<HeaderItem>, BackfillReport)> {
        let items = self.header().await?;
        let (filled, report) = self.localization.ensure_header_locale(&items, locales).await?;
        if report.changed() && !dry_run {
            self.save_header(&filled).await?;
            info!(applied = report.applied, "Saved backfilled header");
        }
        Ok((filled, report))
    }

    /// Load the footer, fill `locales`, and save the sections that changed
    /// unless `dry_run`.
    pub async fn backfill_footer(
        &self,
        locales: &[LocaleCode],
        dry_run: bool,
    ) -> AppResult<(Vec<FooterSection>, BackfillReport)> {
        let sections = self.footer().await?;
        let (filled, report) = self
            .localization
            .ensure_footer_locale(&sections, locales)
            .await?;
        if report.changed() && !dry_run {
            let changed: Vec<FooterSection> = filled
                .iter()
                .zip(&sections)
                .filter(|(new, old)| new != old)
                .map(|(new, _)| new.clone())
                .collect();
            self.save_footer(&changed).await?;
            info!(sections = changed.len(), "Saved backfilled footer");
        }
        Ok((filled, report))
    }
}
