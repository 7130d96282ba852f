//! Site header and footer navigation.
//!
//! Both are shallow trees (group → links). Every entry carries a base
//! `title` plus a sparse `titles` map keyed by locale, following the same
//! fallback rule as node overrides: a missing locale means "use `title`".

pub mod footer;
pub mod header;

use std::collections::BTreeMap;

use churchlink_core::types::LocaleCode;

use crate::page::Localized;

pub use footer::{FooterItem, FooterSection};
pub use header::{HeaderItem, HeaderLink};

/// Localized titles of one navigation entry.
pub type Titles = BTreeMap<LocaleCode, String>;

/// Look up a title override.
pub fn lookup_title(titles: &Titles, locale: &LocaleCode) -> Localized {
    match titles.get(locale) {
        Some(title) => Localized::Overridden(title.clone()),
        None => Localized::Inherited,
    }
}

/// A navigation group whose entries all carry localizable titles.
pub trait TitledGroup {
    /// Visit the base title and overrides of the group and each entry.
    fn visit_titles(&self, f: &mut dyn FnMut(&str, &Titles));

    /// Same as [`visit_titles`](Self::visit_titles) with mutable overrides.
    fn visit_titles_mut(&mut self, f: &mut dyn FnMut(&str, &mut Titles));

    /// The group's own display title in `locale`.
    fn display_title(&self, locale: &LocaleCode) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_title() {
        let es: LocaleCode = "es".parse().unwrap();
        let mut titles = Titles::new();
        assert_eq!(lookup_title(&titles, &es), Localized::Inherited);
        titles.insert(es.clone(), "Inicio".into());
        assert_eq!(lookup_title(&titles, &es).or_base("Home"), "Inicio");
    }
}
