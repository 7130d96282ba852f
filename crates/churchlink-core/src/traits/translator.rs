//! Batched machine translation.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::LocaleCode;

/// Translations keyed by source string, then by destination locale code.
pub type TranslationTable = BTreeMap<String, BTreeMap<String, String>>;

/// A translator that handles many strings and locales in one round trip.
///
/// Implementations may omit entries they could not translate; callers must
/// treat a missing `table[source][locale]` as "no translation produced".
#[async_trait]
pub trait Translator: Send + Sync + std::fmt::Debug + 'static {
    /// Translate every string in `items` from `src` into each of `dest_languages`.
    async fn translate_multi(
        &self,
        items: &[String],
        dest_languages: &[LocaleCode],
        src: &LocaleCode,
    ) -> AppResult<TranslationTable>;
}
