//! Page entity model.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use churchlink_core::error::AppError;
use churchlink_core::types::LocaleCode;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::page::section::SectionV2;

/// Layout generation of a stored page.
///
/// Stored as an integer discriminator: `1` (or absent) is the legacy
/// single-locale layout, `2` is the sectioned, localizable tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PageVersion {
    /// Single-locale page predating the section tree.
    #[default]
    Legacy,
    /// Localizable section/node tree.
    V2,
}

impl TryFrom<u8> for PageVersion {
    type Error = SchemaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Legacy),
            2 => Ok(Self::V2),
            other => Err(SchemaError(format!("Unknown page version: {other}"))),
        }
    }
}

impl From<PageVersion> for u8 {
    fn from(version: PageVersion) -> u8 {
        match version {
            PageVersion::Legacy => 1,
            PageVersion::V2 => 2,
        }
    }
}

/// Which copy of a page to address. Staging and live share one slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditState {
    /// The draft being edited.
    Staging,
    /// The draft rendered for preview.
    Preview,
    /// The published copy.
    Live,
}

impl EditState {
    /// Path segment used by the pages endpoints.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Preview => "preview",
            Self::Live => "slug",
        }
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Preview => "preview",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staging" | "draft" => Ok(Self::Staging),
            "preview" => Ok(Self::Preview),
            "live" | "published" => Ok(Self::Live),
            _ => Err(AppError::validation(format!(
                "Invalid page state: '{s}'. Expected one of: staging, preview, live"
            ))),
        }
    }
}

/// A web-builder page.
///
/// Section and node ids share one namespace and are unique within a page;
/// payloads that repeat an id are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPage")]
pub struct Page {
    /// Backend document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Page title.
    pub title: String,
    /// URL slug shared by the staging and live copies.
    pub slug: String,
    /// Ordered sections.
    #[serde(default)]
    pub sections: Vec<Arc<SectionV2>>,
    /// Whether the page is shown on the public site.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the page is protected from deletion and slug changes.
    #[serde(default)]
    pub locked: bool,
    /// Layout generation.
    #[serde(default)]
    pub version: PageVersion,
    /// Optimistic-concurrency revision, bumped by every accepted save.
    #[serde(default)]
    pub revision: u64,
    /// When the backend last stored this copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Locale of the base `props` values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<LocaleCode>,
    /// Additional locales the page is offered in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<LocaleCode>,
}

impl Page {
    /// Create an empty, visible V2 page.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            slug: slug.into(),
            sections: Vec::new(),
            visible: true,
            locked: false,
            version: PageVersion::V2,
            revision: 0,
            updated_at: None,
            default_locale: None,
            locales: Vec::new(),
        }
    }

    /// Attach sections.
    pub fn with_sections(mut self, sections: Vec<SectionV2>) -> Self {
        self.sections = sections.into_iter().map(Arc::new).collect();
        self
    }

    /// Short listing form of this page.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            visible: self.visible,
            locked: self.locked,
        }
    }
}

/// Wire representation of a [`Page`], checked before it becomes one.
#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    title: String,
    slug: String,
    #[serde(default)]
    sections: Vec<Arc<SectionV2>>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    version: PageVersion,
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    default_locale: Option<LocaleCode>,
    #[serde(default)]
    locales: Vec<LocaleCode>,
}

impl TryFrom<RawPage> for Page {
    type Error = SchemaError;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        let page = Page {
            id: raw.id,
            title: raw.title,
            slug: raw.slug,
            sections: raw.sections,
            visible: raw.visible,
            locked: raw.locked,
            version: raw.version,
            revision: raw.revision,
            updated_at: raw.updated_at,
            default_locale: raw.default_locale,
            locales: raw.locales,
        };
        page.check_unique_ids()?;
        Ok(page)
    }
}

impl Page {
    /// Fail on the first section or node id that appears twice.
    pub fn check_unique_ids(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        let ids = self
            .sections
            .iter()
            .map(|section| section.id.as_str())
            .chain(self.walk().map(|node| node.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                return Err(SchemaError(format!(
                    "Page '{}' uses the id '{id}' more than once",
                    self.slug
                )));
            }
        }
        Ok(())
    }
}

/// Listing form of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Backend document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Page title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Whether the page is shown on the public site.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the page is locked.
    #[serde(default)]
    pub locked: bool,
}

/// What the backend reports after accepting a staging save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// The revision now stored.
    pub revision: u64,
    /// When it was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_page_is_legacy() {
        let page: Page = serde_json::from_str(r#"{"title":"Home","slug":"home"}"#).unwrap();
        assert_eq!(page.version, PageVersion::Legacy);
        assert!(page.visible);
        assert_eq!(page.revision, 0);
    }

    #[test]
    fn test_v2_page_with_sections() {
        let page: Page = serde_json::from_str(
            r#"{"_id":"abc","title":"About","slug":"about","version":2,"revision":7,
                "updated_at":"2026-03-01T10:00:00Z","default_locale":"en","locales":["es"],
                "sections":[{"id":"s1","name":"Hero","children":[
                    {"id":"n1","type":"text","props":{"html":"Welcome"}}]}]}"#,
        )
        .unwrap();
        assert_eq!(page.version, PageVersion::V2);
        assert_eq!(page.sections[0].children[0].id.as_str(), "n1");
        assert_eq!(page.id.as_deref(), Some("abc"));
        assert!(page.updated_at.is_some());
    }

    #[test]
    fn test_bad_timestamp_fails_loudly() {
        let err = serde_json::from_str::<Page>(
            r#"{"title":"Home","slug":"home","updated_at":"yesterday"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_unknown_version_fails() {
        let err = serde_json::from_str::<Page>(r#"{"title":"Home","slug":"home","version":9}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let nodes = serde_json::from_str::<Page>(
            r#"{"title":"Home","slug":"home","version":2,"sections":[{"id":"s","children":[
                {"id":"n1","type":"text","props":{"html":"A"}},
                {"id":"n1","type":"text","props":{"html":"B"}}]}]}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(nodes.contains("'n1'"), "{nodes}");

        let across = serde_json::from_str::<Page>(
            r#"{"title":"Home","slug":"home","version":2,"sections":[
                {"id":"hero","children":[{"id":"c","type":"container","children":[
                    {"id":"x","type":"text","props":{"html":"A"}}]}]},
                {"id":"x","children":[]}]}"#,
        );
        assert!(across.is_err());
    }

    #[test]
    fn test_edit_state_parsing() {
        assert_eq!("draft".parse::<EditState>().unwrap(), EditState::Staging);
        assert_eq!(EditState::Live.path_segment(), "slug");
        assert!("archived".parse::<EditState>().is_err());
    }
}
