//! Header and footer use cases.

pub mod service;

pub use service::NavigationService;
