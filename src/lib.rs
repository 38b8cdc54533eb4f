//! spush library
//!
//! Pushes text notes to Pushbullet. The client is async-first
//! ([`AsyncPushbulletClient`]) with a blocking wrapper
//! ([`PushbulletClient`]) for callers outside an async runtime.

pub mod config;
pub mod errors;
pub mod pushbullet;
pub mod shared;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigManager};
pub use errors::{AppError, AppResult, PushError, PushErrorKind};
pub use pushbullet::{AccessToken, Endpoint, NoteMessage};
pub use shared::clients::{AsyncPushbulletClient, NoteSender, PushbulletClient, PushbulletClientConfig};
