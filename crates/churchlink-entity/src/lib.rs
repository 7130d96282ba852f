//! # churchlink-entity
//!
//! Domain models for the ChurchLink web builder: localizable page trees
//! (`Page` → `SectionV2` → `Node`), header and footer navigation, the
//! translator wire DTOs, and the persistence traits implemented by the
//! REST client and the in-memory store.
//!
//! Page trees are immutable values. Every edit returns a new `Page` that
//! shares all untouched subtrees with its input through `Arc`.

pub mod error;
pub mod navigation;
pub mod page;
pub mod store;
pub mod translation;

pub use error::{SchemaError, TreeError};
