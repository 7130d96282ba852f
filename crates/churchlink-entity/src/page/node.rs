//! Content nodes.
//!
//! A node is serialized as `{ id, type, props, i18n?, children? }`. The
//! `props` object is parsed into a typed struct per variant; keys the model
//! does not know about (styling hints and the like) are carried through
//! untouched in `extra`. Anything that does not fit the schema is rejected
//! at deserialization time.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::page::i18n::I18nTable;
use crate::page::id::NodeId;

/// The closed set of node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Rich text block.
    Text,
    /// Call-to-action button.
    Button,
    /// Image with optional alt text.
    Image,
    /// Layout container holding child nodes.
    Container,
}

impl NodeType {
    /// Return the type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Button => "button",
            Self::Image => "image",
            Self::Container => "container",
        }
    }

    /// Keys of `props` that may carry per-locale overrides.
    pub fn translatable_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &["html"],
            Self::Button => &["label"],
            Self::Image => &["alt"],
            Self::Container => &[],
        }
    }

    /// Whether `key` may carry a per-locale override.
    pub fn is_translatable(&self, key: &str) -> bool {
        self.translatable_keys().contains(&key)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "button" => Ok(Self::Button),
            "image" => Ok(Self::Image),
            "container" => Ok(Self::Container),
            _ => Err(SchemaError(format!(
                "Invalid node type: '{s}'. Expected one of: text, button, image, container"
            ))),
        }
    }
}

/// Props of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    /// Base-locale HTML content.
    pub html: String,
    /// Props the model does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props of a button node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonProps {
    /// Base-locale label.
    pub label: String,
    /// Link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Props the model does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props of an image node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Image URL.
    pub src: String,
    /// Base-locale alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Props the model does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Props of a container node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerProps {
    /// Layout hint (`row`, `column`, `grid`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Props the model does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Variant-specific base-locale content of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Text(TextProps),
    Button(ButtonProps),
    Image(ImageProps),
    Container(ContainerProps),
}

impl NodeContent {
    /// A text block with the given HTML.
    pub fn text(html: impl Into<String>) -> Self {
        Self::Text(TextProps {
            html: html.into(),
            extra: Map::new(),
        })
    }

    /// A button with the given label.
    pub fn button(label: impl Into<String>, href: Option<String>) -> Self {
        Self::Button(ButtonProps {
            label: label.into(),
            href,
            extra: Map::new(),
        })
    }

    /// An image with optional alt text.
    pub fn image(src: impl Into<String>, alt: Option<String>) -> Self {
        Self::Image(ImageProps {
            src: src.into(),
            alt,
            extra: Map::new(),
        })
    }

    /// An empty container.
    pub fn container() -> Self {
        Self::Container(ContainerProps::default())
    }

    /// The variant tag.
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Text(_) => NodeType::Text,
            Self::Button(_) => NodeType::Button,
            Self::Image(_) => NodeType::Image,
            Self::Container(_) => NodeType::Container,
        }
    }

    /// The base value of a translatable key, when present.
    pub fn translatable(&self, key: &str) -> Option<&str> {
        match (self, key) {
            (Self::Text(p), "html") => Some(&p.html),
            (Self::Button(p), "label") => Some(&p.label),
            (Self::Image(p), "alt") => p.alt.as_deref(),
            _ => None,
        }
    }

    /// Every translatable `(key, base value)` pair present on this node.
    pub fn translatable_entries(&self) -> Vec<(&'static str, &str)> {
        self.node_type()
            .translatable_keys()
            .iter()
            .filter_map(|key| self.translatable(key).map(|value| (*key, value)))
            .collect()
    }

    /// Serialize the props back to their JSON object form.
    pub fn to_props(&self) -> Map<String, Value> {
        let value = match self {
            Self::Text(p) => serde_json::to_value(p),
            Self::Button(p) => serde_json::to_value(p),
            Self::Image(p) => serde_json::to_value(p),
            Self::Container(p) => serde_json::to_value(p),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Parse a props object for the given variant.
    pub fn from_props(node_type: NodeType, props: Map<String, Value>) -> Result<Self, SchemaError> {
        let value = Value::Object(props);
        let parsed = match node_type {
            NodeType::Text => serde_json::from_value(value).map(Self::Text),
            NodeType::Button => serde_json::from_value(value).map(Self::Button),
            NodeType::Image => serde_json::from_value(value).map(Self::Image),
            NodeType::Container => serde_json::from_value(value).map(Self::Container),
        };
        parsed.map_err(|e| SchemaError(format!("Invalid {node_type} props: {e}")))
    }
}

/// One element of a page-content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    /// Stable identifier, unique within the page.
    pub id: NodeId,
    /// Base-locale content.
    pub content: NodeContent,
    /// Per-locale overrides of translatable keys.
    pub i18n: I18nTable,
    /// Ordered children; only containers may have any.
    pub children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a childless node without translations.
    pub fn new(id: NodeId, content: NodeContent) -> Self {
        Self {
            id,
            content,
            i18n: I18nTable::new(),
            children: Vec::new(),
        }
    }

    /// Create a node with a freshly generated id, as the palette does.
    pub fn generated(content: NodeContent) -> Self {
        Self::new(NodeId::generate(), content)
    }

    /// Attach children. Only meaningful for containers; validated on insert.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    /// The variant tag.
    pub fn node_type(&self) -> NodeType {
        self.content.node_type()
    }

    /// Whether this node may hold children.
    pub fn is_container(&self) -> bool {
        self.node_type() == NodeType::Container
    }

    /// Ids of this node and all its descendants, preorder.
    pub fn subtree_ids(&self) -> Vec<&NodeId> {
        let mut ids = vec![&self.id];
        for child in &self.children {
            ids.extend(child.subtree_ids());
        }
        ids
    }

    /// Whether `id` is this node or one of its descendants.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.id == *id || self.children.iter().any(|child| child.contains(id))
    }

    /// Check the invariants that serde alone cannot express.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.children.is_empty() && !self.is_container() {
            return Err(SchemaError(format!(
                "Node '{}' of type {} cannot have children",
                self.id,
                self.node_type()
            )));
        }
        let node_type = self.node_type();
        for (locale, key, _) in self.i18n.entries() {
            if !node_type.is_translatable(key) {
                return Err(SchemaError(format!(
                    "Node '{}' has an i18n override for '{key}' in '{locale}', \
                     which is not a translatable key of a {node_type} node",
                    self.id
                )));
            }
            if self.content.translatable(key).is_none() {
                return Err(SchemaError(format!(
                    "Node '{}' has an i18n override for '{key}' in '{locale}' \
                     but no base value for it",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Wire representation of a [`Node`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: NodeId,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "I18nTable::is_empty")]
    i18n: I18nTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Arc<Node>>,
}

impl TryFrom<RawNode> for Node {
    type Error = SchemaError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let node = Node {
            content: NodeContent::from_props(raw.node_type, raw.props)
                .map_err(|e| SchemaError(format!("Node '{}': {e}", raw.id)))?,
            id: raw.id,
            i18n: raw.i18n,
            children: raw.children,
        };
        node.validate()?;
        Ok(node)
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            node_type: node.content.node_type(),
            props: node.content.to_props(),
            i18n: node.i18n,
            children: node.children,
        }
    }
}
