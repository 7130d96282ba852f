//! Footer navigation sections.

use serde::{Deserialize, Serialize};

use churchlink_core::types::LocaleCode;

use crate::navigation::{lookup_title, Titles, TitledGroup};

/// A titled column of footer links. The backend addresses sections by
/// their base title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterSection {
    pub title: String,
    #[serde(default)]
    pub titles: Titles,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<FooterItem>,
}

/// One footer entry. Entries without a url render as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterItem {
    pub title: String,
    #[serde(default)]
    pub titles: Titles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FooterSection {
    pub fn new(title: impl Into<String>, items: Vec<FooterItem>) -> Self {
        Self {
            title: title.into(),
            titles: Titles::new(),
            visible: true,
            items,
        }
    }
}

impl FooterItem {
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            titles: Titles::new(),
            url,
        }
    }
}

impl TitledGroup for FooterSection {
    fn visit_titles(&self, f: &mut dyn FnMut(&str, &Titles)) {
        f(&self.title, &self.titles);
        for item in &self.items {
            f(&item.title, &item.titles);
        }
    }

    fn visit_titles_mut(&mut self, f: &mut dyn FnMut(&str, &mut Titles)) {
        f(&self.title, &mut self.titles);
        for item in &mut self.items {
            f(&item.title, &mut item.titles);
        }
    }

    fn display_title(&self, locale: &LocaleCode) -> String {
        lookup_title(&self.titles, locale).or_base(&self.title)
    }
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        let section: FooterSection = serde_json::from_str(
            r#"{"title":"Contact","items":[{"title":"123 Main St"},{"title":"Email","url":"mailto:a@b.org"}]}"#,
        )
        .unwrap();
        assert!(section.visible);
        assert!(section.items[0].url.is_none());
        assert_eq!(section.items[1].url.as_deref(), Some("mailto:a@b.org"));
    }

    #[test]
    fn test_visit_titles_mut_reaches_items() {
        let es: LocaleCode = "es".parse().unwrap();
        let mut section = FooterSection::new("Contact", vec![FooterItem::new("Email", None)]);
        section.visit_titles_mut(&mut |title, titles| {
            titles.insert(es.clone(), format!("{title} (es)"));
        });
        assert_eq!(section.items[0].titles.get(&es).map(String::as_str), Some("Email (es)"));
        assert_eq!(section.display_title(&es), "Contact (es)");
    }
}
