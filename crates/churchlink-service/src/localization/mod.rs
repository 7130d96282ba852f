//! Localization backfill.
//!
//! When a site gains a locale, every translatable base string that has no
//! override in that locale is collected, translated in one batched call,
//! and merged back without touching overrides that already exist.

pub mod collect;
pub mod merge;
pub mod report;
pub mod service;

pub use report::BackfillReport;
pub use service::LocalizationService;
