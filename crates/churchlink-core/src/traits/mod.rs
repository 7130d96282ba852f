//! Collaborator traits defined in `churchlink-core` and implemented by
//! other crates.

pub mod translator;

pub use translator::{TranslationTable, Translator};
