//! Convenience result type alias for ChurchLink.

use crate::error::AppError;

/// A specialized `Result` type for ChurchLink operations.
pub type AppResult<T> = Result<T, AppError>;
