//! Shared fixtures for service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use churchlink_core::result::AppResult;
use churchlink_core::traits::{TranslationTable, Translator};
use churchlink_core::types::LocaleCode;
use churchlink_entity::page::{Node, NodeContent, NodeId, Page, SectionId, SectionV2};
use churchlink_service::{LocalizationService, MemoryPageStore, NavigationService, PageService};

/// Translator that knows a handful of Spanish phrases and records calls.
#[derive(Debug, Default)]
pub struct PhraseBook {
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl PhraseBook {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for PhraseBook {
    async fn translate_multi(
        &self,
        items: &[String],
        dest_languages: &[LocaleCode],
        _src: &LocaleCode,
    ) -> AppResult<TranslationTable> {
        self.calls.lock().unwrap().push(items.to_vec());
        let mut table = TranslationTable::new();
        for item in items {
            for dest in dest_languages {
                let text = match (item.as_str(), dest.as_str()) {
                    ("Welcome", "es") => "Bienvenido",
                    ("Join us", "es") => "Únete",
                    ("Choir", "es") => "Coro",
                    ("Contact", "es") => "Contacto",
                    (other, code) => {
                        table
                            .entry(item.clone())
                            .or_default()
                            .insert(code.to_string(), format!("{other} ({code})"));
                        continue;
                    }
                };
                table
                    .entry(item.clone())
                    .or_default()
                    .insert(dest.to_string(), text.to_string());
            }
        }
        Ok(table)
    }
}

pub struct Harness {
    pub store: Arc<MemoryPageStore>,
    pub translator: Arc<PhraseBook>,
    pub pages: PageService,
    pub navigation: NavigationService,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryPageStore::new());
        let translator = Arc::new(PhraseBook::default());
        let localization = LocalizationService::new(translator.clone(), locale("en"));
        Self {
            pages: PageService::new(store.clone(), localization.clone(), 20),
            navigation: NavigationService::new(store.clone(), localization),
            store,
            translator,
        }
    }
}

pub fn locale(raw: &str) -> LocaleCode {
    raw.parse().unwrap()
}

pub fn node_id(raw: &str) -> NodeId {
    NodeId::new(raw).unwrap()
}

pub fn section_id(raw: &str) -> SectionId {
    SectionId::new(raw).unwrap()
}

/// A two-section page with a nested container.
pub fn home_page() -> Page {
    Page::new("Home", "home").with_sections(vec![
        SectionV2::new(section_id("hero"), "Hero").with_children(vec![
            Node::new(node_id("n1"), NodeContent::text("Welcome")),
            Node::new(node_id("row"), NodeContent::container()).with_children(vec![
                Node::new(node_id("n2"), NodeContent::button("Join us", Some("/join".into()))),
                Node::new(node_id("img"), NodeContent::image("/choir.jpg", Some("Choir".into()))),
            ]),
        ]),
        SectionV2::new(section_id("closing"), "Closing")
            .with_children(vec![Node::new(node_id("n3"), NodeContent::text("Welcome"))]),
    ])
}
