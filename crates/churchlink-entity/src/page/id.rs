//! Identifiers for page sections and nodes.
//!
//! Ids are opaque strings chosen by the editor (often short slugs such as
//! `n1`). They must be non-empty and are unique within one page across
//! both sections and nodes. Freshly created elements get a UUID v4 string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SchemaError;

/// Macro to define a string-backed id newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id, rejecting blank values.
            pub fn new(id: impl Into<String>) -> Result<Self, SchemaError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(SchemaError(format!(
                        "{} must not be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(id))
            }

            /// Create a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Return the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = SchemaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = SchemaError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a content node.
    NodeId
);

define_id!(
    /// Identifier of a page section.
    SectionId
);

/// Where new children go: the root list of a section, or a container node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentId {
    /// The section's root-level children.
    Section(SectionId),
    /// The children of a container node.
    Node(NodeId),
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section(id) => write!(f, "{id}"),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

impl From<SectionId> for ParentId {
    fn from(id: SectionId) -> Self {
        Self::Section(id)
    }
}

impl From<NodeId> for ParentId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}
