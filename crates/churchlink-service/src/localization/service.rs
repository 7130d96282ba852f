//! Backfill orchestration: collect, translate once, merge.

use std::sync::Arc;

use churchlink_core::error::AppError;
use churchlink_core::result::AppResult;
use churchlink_core::traits::{TranslationTable, Translator};
use churchlink_core::types::LocaleCode;
use churchlink_entity::TreeError;
use churchlink_entity::navigation::{FooterSection, HeaderItem, TitledGroup};
use churchlink_entity::page::{Page, PageVersion};
use tracing::{debug, info};

use super::collect::{Pending, collect_page, collect_titles};
use super::merge::{MergeStats, merge_page, merge_titles};
use super::report::BackfillReport;

/// Fills missing translations through a batched [`Translator`].
#[derive(Debug, Clone)]
pub struct LocalizationService {
    translator: Arc<dyn Translator>,
    /// Locale of base strings when a page does not name its own.
    source_locale: LocaleCode,
}

impl LocalizationService {
    pub fn new(translator: Arc<dyn Translator>, source_locale: LocaleCode) -> Self {
        Self {
            translator,
            source_locale,
        }
    }

    /// The configured source locale.
    pub fn source_locale(&self) -> &LocaleCode {
        &self.source_locale
    }

    /// Add machine translations for `locales` to every node that lacks one.
    ///
    /// Returns the new page; `page` itself is never modified.
    pub async fn ensure_page_locale(
        &self,
        page: &Page,
        locales: &[LocaleCode],
    ) -> AppResult<(Page, BackfillReport)> {
        if page.version == PageVersion::Legacy {
            return Err(TreeError::LegacyPage(page.slug.clone()).into());
        }
        let source = page.default_locale.as_ref().unwrap_or(&self.source_locale);
        let locales = targets(locales, source)?;

        let pending = collect_page(page, &locales);
        let requested = pending.len();
        let table = self.translate(pending, &locales, source).await?;
        let (merged, stats) = merge_page(page, &table, &locales);

        let report = report(locales, requested, stats);
        info!(
            slug = %page.slug,
            requested = report.requested,
            applied = report.applied,
            missing = report.missing,
            "Page locale backfill finished"
        );
        Ok((merged, report))
    }

    /// Add machine translations for `locales` to the header entries.
    pub async fn ensure_header_locale(
        &self,
        items: &[HeaderItem],
        locales: &[LocaleCode],
    ) -> AppResult<(Vec<HeaderItem>, BackfillReport)> {
        let (items, report) = self.ensure_titles(items, locales).await?;
        info!(applied = report.applied, "Header locale backfill finished");
        Ok((items, report))
    }

    /// Add machine translations for `locales` to the footer sections.
    pub async fn ensure_footer_locale(
        &self,
        sections: &[FooterSection],
        locales: &[LocaleCode],
    ) -> AppResult<(Vec<FooterSection>, BackfillReport)> {
        let (sections, report) = self.ensure_titles(sections, locales).await?;
        info!(applied = report.applied, "Footer locale backfill finished");
        Ok((sections, report))
    }

    async fn ensure_titles<G>(
        &self,
        groups: &[G],
        locales: &[LocaleCode],
    ) -> AppResult<(Vec<G>, BackfillReport)>
    where
        G: TitledGroup + Clone,
    {
        let source = &self.source_locale;
        let locales = targets(locales, source)?;

        let pending = collect_titles(groups, &locales);
        let requested = pending.len();
        let table = self.translate(pending, &locales, source).await?;

        let mut merged = groups.to_vec();
        let stats = merge_titles(&mut merged, &table, &locales);
        Ok((merged, report(locales, requested, stats)))
    }

    /// One translator round trip, skipped entirely when nothing is missing.
    async fn translate(
        &self,
        pending: Pending,
        locales: &[LocaleCode],
        source: &LocaleCode,
    ) -> AppResult<TranslationTable> {
        if pending.is_empty() {
            debug!("Nothing to translate");
            return Ok(TranslationTable::new());
        }
        let items = pending.into_items();
        self.translator
            .translate_multi(&items, locales, source)
            .await
    }
}

/// Validate and deduplicate the requested locales.
fn targets(locales: &[LocaleCode], source: &LocaleCode) -> AppResult<Vec<LocaleCode>> {
    if locales.is_empty() {
        return Err(AppError::validation("At least one target locale is required"));
    }
    let mut unique: Vec<LocaleCode> = Vec::with_capacity(locales.len());
    for locale in locales {
        if locale == source {
            return Err(AppError::validation(format!(
                "Locale '{locale}' is the source locale and cannot be backfilled"
            )));
        }
        if !unique.contains(locale) {
            unique.push(locale.clone());
        }
    }
    Ok(unique)
}

fn report(locales: Vec<LocaleCode>, requested: usize, stats: MergeStats) -> BackfillReport {
    BackfillReport {
        locales,
        requested,
        applied: stats.applied,
        skipped_existing: stats.skipped_existing,
        missing: stats.missing,
    }
}
