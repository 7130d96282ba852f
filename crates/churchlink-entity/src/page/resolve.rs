//! Locale resolution for rendering.

use churchlink_core::types::LocaleCode;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::page::id::{NodeId, SectionId};
use crate::page::model::Page;
use crate::page::node::{Node, NodeType};

/// The props a renderer should display for `node` in `locale`.
///
/// Every key present in the base props is kept. Translatable keys take the
/// locale's override when one exists. Asking for the default locale returns
/// the base props unchanged.
pub fn resolve_localized(
    node: &Node,
    locale: &LocaleCode,
    default_locale: Option<&LocaleCode>,
) -> Map<String, Value> {
    let mut props = node.content.to_props();
    if default_locale == Some(locale) {
        return props;
    }
    for key in node.node_type().translatable_keys() {
        if let Some(base) = props.get_mut(*key) {
            if let Some(text) = node.i18n.get(locale, key) {
                *base = Value::String(text.to_string());
            }
        }
    }
    props
}

/// A node with its props resolved for one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub props: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedNode>,
}

/// A section with resolved nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSection {
    pub id: SectionId,
    pub name: String,
    pub children: Vec<ResolvedNode>,
}

/// A read-only, single-locale rendering of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPage {
    pub title: String,
    pub slug: String,
    pub locale: LocaleCode,
    pub sections: Vec<ResolvedSection>,
}

impl Page {
    /// Resolve the whole page for `locale`.
    ///
    /// `fallback_default` is used when the page does not name its own
    /// default locale.
    pub fn resolve(&self, locale: &LocaleCode, fallback_default: &LocaleCode) -> ResolvedPage {
        let default = self.default_locale.as_ref().unwrap_or(fallback_default);
        ResolvedPage {
            title: self.title.clone(),
            slug: self.slug.clone(),
            locale: locale.clone(),
            sections: self
                .sections
                .iter()
                .map(|section| ResolvedSection {
                    id: section.id.clone(),
                    name: section.name.clone(),
                    children: section
                        .children
                        .iter()
                        .map(|node| resolve_node(node, locale, default))
                        .collect(),
                })
                .collect(),
        }
    }
}

fn resolve_node(node: &Node, locale: &LocaleCode, default: &LocaleCode) -> ResolvedNode {
    ResolvedNode {
        id: node.id.clone(),
        node_type: node.node_type(),
        props: resolve_localized(node, locale, Some(default)),
        children: node
            .children
            .iter()
            .map(|child| resolve_node(child, locale, default))
            .collect(),
    }
}
