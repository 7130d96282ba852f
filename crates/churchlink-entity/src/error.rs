//! Errors raised by page-tree edits and payload validation.

use churchlink_core::error::{AppError, ErrorKind};
use thiserror::Error;

use crate::page::{NodeId, SectionId};

/// A rejected page-tree edit. The page the edit was applied to is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("Section '{0}' not found")]
    SectionNotFound(SectionId),

    #[error("Parent '{0}' not found")]
    ParentNotFound(String),

    #[error("Node '{0}' is not a container and cannot hold children")]
    NotAContainer(NodeId),

    #[error("Index {index} is out of range for a list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Id '{0}' already exists in this page")]
    DuplicateId(String),

    #[error("Cannot move node '{0}' into its own subtree")]
    MoveIntoSelf(NodeId),

    #[error("Key '{key}' of a {node_type} node cannot be localized")]
    NotTranslatable { node_type: String, key: String },

    #[error("Invalid props: {0}")]
    InvalidProps(String),

    #[error("Page '{0}' uses the legacy single-locale layout and cannot be edited as a tree")]
    LegacyPage(String),
}

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        let kind = match &err {
            TreeError::NodeNotFound(_)
            | TreeError::SectionNotFound(_)
            | TreeError::ParentNotFound(_) => ErrorKind::NotFound,
            TreeError::DuplicateId(_) => ErrorKind::Conflict,
            _ => ErrorKind::Validation,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

/// A payload that deserialized syntactically but violates the page schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SchemaError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let missing: AppError = TreeError::NodeNotFound(NodeId::new("n1").unwrap()).into();
        assert_eq!(missing.kind, ErrorKind::NotFound);

        let dup: AppError = TreeError::DuplicateId("n1".to_string()).into();
        assert_eq!(dup.kind, ErrorKind::Conflict);

        let range: AppError = TreeError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(range.kind, ErrorKind::Validation);
        assert_eq!(
            range.message,
            "Index 4 is out of range for a list of 2 entries"
        );
    }
}
