//! Error context enhancement utilities
//!
//! Attaches the failing file operation to foreign errors when they are
//! lifted into [`AppError`].

use super::types::AppError;
use std::path::PathBuf;

/// Extension trait for adding context to error types
pub trait ErrorContextExt<T> {
    /// Add operation and file context
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError>;
}

impl<T, E> ErrorContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError> {
        self.map_err(|e| AppError::io_with_source(path, operation, e))
    }
}
