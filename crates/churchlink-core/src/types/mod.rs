//! Core type definitions used across the ChurchLink workspace.

pub mod list;
pub mod locale;

pub use list::{ListRequest, ListResponse};
pub use locale::LocaleCode;
