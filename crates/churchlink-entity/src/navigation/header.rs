//! Header navigation entries.

use serde::{Deserialize, Serialize};

use churchlink_core::types::LocaleCode;

use crate::navigation::{lookup_title, Titles, TitledGroup};

/// A top-level header entry: either a direct link or a dropdown of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub title: String,
    #[serde(default)]
    pub titles: Titles,
    /// Target when the entry is a direct link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Dropdown entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<HeaderLink>,
}

/// A link inside a header dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLink {
    pub title: String,
    #[serde(default)]
    pub titles: Titles,
    pub url: String,
}

impl HeaderItem {
    /// A direct link entry.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            titles: Titles::new(),
            url: Some(url.into()),
            visible: true,
            items: Vec::new(),
        }
    }

    /// A dropdown entry.
    pub fn dropdown(title: impl Into<String>, items: Vec<HeaderLink>) -> Self {
        Self {
            title: title.into(),
            titles: Titles::new(),
            url: None,
            visible: true,
            items,
        }
    }
}

impl HeaderLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            titles: Titles::new(),
            url: url.into(),
        }
    }
}

impl TitledGroup for HeaderItem {
    fn visit_titles(&self, f: &mut dyn FnMut(&str, &Titles)) {
        f(&self.title, &self.titles);
        for link in &self.items {
            f(&link.title, &link.titles);
        }
    }

    fn visit_titles_mut(&mut self, f: &mut dyn FnMut(&str, &mut Titles)) {
        f(&self.title, &mut self.titles);
        for link in &mut self.items {
            f(&link.title, &mut link.titles);
        }
    }

    fn display_title(&self, locale: &LocaleCode) -> String {
        lookup_title(&self.titles, locale).or_base(&self.title)
    }
}

fn default_visible() -> bool {
    true
}
