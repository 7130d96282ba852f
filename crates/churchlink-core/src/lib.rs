//! # churchlink-core
//!
//! Core crate for the ChurchLink web builder. Contains the unified error
//! system, configuration schemas, locale codes, list pagination types and
//! the translator collaborator trait.
//!
//! This crate has **no** internal dependencies on other ChurchLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
