//! Centralized error handling module
//!
//! `PushError` is what the Pushbullet client returns; `AppError` is what the
//! CLI layer returns, wrapping `PushError` alongside configuration and
//! argument failures.

pub mod context;
pub mod types;

pub use context::ErrorContextExt;
pub use types::{AppError, AppResult, PushError, PushErrorKind};
