//! Writing translations back without clobbering existing overrides.

use churchlink_core::traits::TranslationTable;
use churchlink_core::types::LocaleCode;
use churchlink_entity::navigation::{Titles, TitledGroup};
use churchlink_entity::page::Page;

/// Counters produced by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub applied: usize,
    pub skipped_existing: usize,
    pub missing: usize,
}

/// Fill missing node overrides from `table`. Returns the new page, which
/// shares every unchanged node with `page`.
pub fn merge_page(
    page: &Page,
    table: &TranslationTable,
    locales: &[LocaleCode],
) -> (Page, MergeStats) {
    let mut stats = MergeStats::default();
    let merged = page.rewrite_nodes(|node| {
        let mut updated = node.clone();
        let mut changed = false;
        for (key, base) in node.content.translatable_entries() {
            if base.trim().is_empty() {
                continue;
            }
            for locale in locales {
                if node.i18n.get(locale, key).is_some() {
                    stats.skipped_existing += 1;
                    continue;
                }
                match lookup(table, base, locale) {
                    Some(text) => {
                        changed |= updated.i18n.set_if_absent(locale, key, text);
                        stats.applied += 1;
                    }
                    None => stats.missing += 1,
                }
            }
        }
        changed.then_some(updated)
    });
    (merged, stats)
}

/// Fill missing navigation title overrides from `table`, in place.
pub fn merge_titles<G: TitledGroup>(
    groups: &mut [G],
    table: &TranslationTable,
    locales: &[LocaleCode],
) -> MergeStats {
    let mut stats = MergeStats::default();
    for group in groups.iter_mut() {
        group.visit_titles_mut(&mut |title, titles| {
            merge_title(title, titles, table, locales, &mut stats);
        });
    }
    stats
}

fn merge_title(
    title: &str,
    titles: &mut Titles,
    table: &TranslationTable,
    locales: &[LocaleCode],
    stats: &mut MergeStats,
) {
    if title.trim().is_empty() {
        return;
    }
    for locale in locales {
        if titles.contains_key(locale) {
            stats.skipped_existing += 1;
            continue;
        }
        match lookup(table, title, locale) {
            Some(text) => {
                titles.insert(locale.clone(), text.to_string());
                stats.applied += 1;
            }
            None => stats.missing += 1,
        }
    }
}

fn lookup<'a>(table: &'a TranslationTable, source: &str, locale: &LocaleCode) -> Option<&'a str> {
    table
        .get(source)
        .and_then(|per_locale| per_locale.get(locale.as_str()))
        .map(String::as_str)
}
