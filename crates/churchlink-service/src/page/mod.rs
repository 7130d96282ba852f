//! Page use cases.

pub mod service;

pub use service::PageService;
