//! # churchlink-client
//!
//! HTTP client for the ChurchLink backend. [`ApiClient`] implements the
//! page and navigation stores and the batched translator against the `/v1`
//! REST contract.
//!
//! Failed requests are logged and returned as [`AppError`]s classified by
//! HTTP status. Nothing is retried.
//!
//! [`AppError`]: churchlink_core::AppError

pub mod client;
pub mod error;
pub mod navigation;
pub mod pages;
pub mod translator;

pub use client::ApiClient;
