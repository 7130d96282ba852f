//! Page sections.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::page::id::SectionId;
use crate::page::node::Node;

/// A named, ordered slice of a page owning a root-level list of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionV2 {
    /// Stable identifier, unique within the page.
    pub id: SectionId,
    /// Display name shown in the builder outline.
    #[serde(default)]
    pub name: String,
    /// Root-level nodes of the section.
    #[serde(default)]
    pub children: Vec<Arc<Node>>,
}

impl SectionV2 {
    /// Create an empty section.
    pub fn new(id: SectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create an empty section with a generated id.
    pub fn generated(name: impl Into<String>) -> Self {
        Self::new(SectionId::generate(), name)
    }

    /// Attach root-level nodes.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }
}
