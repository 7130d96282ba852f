//! Outcome of one backfill run.

use churchlink_core::types::LocaleCode;
use serde::Serialize;

/// Counts reported after a backfill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    /// Locales that were filled.
    pub locales: Vec<LocaleCode>,
    /// Distinct source strings sent to the translator.
    pub requested: usize,
    /// Overrides written.
    pub applied: usize,
    /// `(entry, locale)` pairs left alone because an override existed.
    pub skipped_existing: usize,
    /// `(entry, locale)` pairs the translator returned nothing for.
    pub missing: usize,
}

impl BackfillReport {
    /// Whether the backfill changed anything.
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}
