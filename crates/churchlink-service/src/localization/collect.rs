//! Gathering strings that still need a translation.

use std::collections::HashSet;

use churchlink_core::types::LocaleCode;
use churchlink_entity::navigation::TitledGroup;
use churchlink_entity::page::Page;

/// Source strings in first-seen order, deduplicated by literal text.
///
/// The same text under two different keys is requested once and its
/// translation is reused for both.
#[derive(Debug, Default)]
pub struct Pending {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl Pending {
    /// Record `text` if it is not blank and not yet recorded.
    pub fn push(&mut self, text: &str) {
        if text.trim().is_empty() || self.seen.contains(text) {
            return;
        }
        self.seen.insert(text.to_string());
        self.items.push(text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Base strings of translatable node keys lacking an override in any of
/// `locales`.
pub fn collect_page(page: &Page, locales: &[LocaleCode]) -> Pending {
    let mut pending = Pending::default();
    for node in page.walk() {
        for (key, base) in node.content.translatable_entries() {
            if locales.iter().any(|l| node.i18n.get(l, key).is_none()) {
                pending.push(base);
            }
        }
    }
    pending
}

/// Base titles of navigation entries lacking an override in any of
/// `locales`.
pub fn collect_titles<G: TitledGroup>(groups: &[G], locales: &[LocaleCode]) -> Pending {
    let mut pending = Pending::default();
    for group in groups {
        group.visit_titles(&mut |title, titles| {
            if locales.iter().any(|l| !titles.contains_key(l)) {
                pending.push(title);
            }
        });
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use churchlink_entity::navigation::{HeaderItem, HeaderLink};
    use churchlink_entity::page::{Localized, Node, NodeContent, NodeId, SectionId, SectionV2};

    fn locale(raw: &str) -> LocaleCode {
        raw.parse().unwrap()
    }

    fn node(id: &str, content: NodeContent) -> Node {
        Node::new(NodeId::new(id).unwrap(), content)
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let page = Page::new("Home", "home").with_sections(vec![
            SectionV2::new(SectionId::new("s").unwrap(), "").with_children(vec![
                node("a", NodeContent::text("Welcome")),
                node("b", NodeContent::button("Join", None)),
                node("c", NodeContent::text("Welcome")),
                node("d", NodeContent::image("/x.png", Some("Join".into()))),
                node("e", NodeContent::text("   ")),
            ]),
        ]);
        let pending = collect_page(&page, &[locale("es")]);
        assert_eq!(pending.into_items(), vec!["Welcome", "Join"]);
    }

    #[test]
    fn test_skips_keys_translated_in_every_locale() {
        let mut translated = node("a", NodeContent::text("Welcome"));
        translated
            .i18n
            .set(&locale("es"), "html", Localized::Overridden("Bienvenido".into()));
        let page = Page::new("Home", "home").with_sections(vec![
            SectionV2::new(SectionId::new("s").unwrap(), "").with_children(vec![translated]),
        ]);

        assert!(collect_page(&page, &[locale("es")]).is_empty());
        assert_eq!(collect_page(&page, &[locale("es"), locale("fr")]).len(), 1);
    }

    #[test]
    fn test_collect_titles() {
        let mut about = HeaderItem::dropdown("About", vec![HeaderLink::new("Staff", "/staff")]);
        about.titles.insert(locale("es"), "Acerca".into());
        let items = vec![HeaderItem::link("Home", "/"), about];

        let pending = collect_titles(&items, &[locale("es")]);
        assert_eq!(pending.into_items(), vec!["Home", "Staff"]);
    }
}
