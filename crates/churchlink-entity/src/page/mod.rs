//! Localizable page-content trees.

pub mod i18n;
pub mod id;
pub mod model;
pub mod node;
pub mod resolve;
pub mod section;
pub mod tree;

pub use i18n::{I18nTable, Localized};
pub use id::{NodeId, ParentId, SectionId};
pub use model::{EditState, Page, PageSummary, PageVersion, SaveReceipt};
pub use node::{
    ButtonProps, ContainerProps, ImageProps, Node, NodeContent, NodeType, TextProps,
};
pub use resolve::{ResolvedNode, ResolvedPage, ResolvedSection, resolve_localized};
pub use section::SectionV2;
pub use tree::{NodePatch, NodePath};
