//! Pushbullet client stack
//!
//! Each call goes through the same pipeline:
//!
//! - **request**: builds an [`ApiRequest`] as plain data (method, URL,
//!   headers, JSON body, fixed timeout)
//! - **pushbullet**: sends it with reqwest and collects an [`HttpOutcome`]
//! - **classify**: maps the outcome to the body text or a [`PushError`]
//!
//! [`AsyncPushbulletClient`] is the primary, async implementation.
//! [`PushbulletClient`] wraps it for blocking callers, running the transport
//! on a private runtime through [`bridge::Bridge`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spush::pushbullet::AccessToken;
//! use spush::shared::clients::{AsyncPushbulletClient, NoteSender};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), spush::errors::PushError> {
//! let client = AsyncPushbulletClient::with_token(AccessToken::new("o.my-token")?)?;
//! client.push_note("Build finished", "All tests passed").await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`PushError`]: crate::errors::PushError

pub mod bridge;
pub mod classify;
pub mod pushbullet;
pub mod request;
pub mod traits;

pub use classify::{classify, HttpOutcome};
pub use pushbullet::{AsyncPushbulletClient, PushbulletClient, PushbulletClientConfig};
pub use request::{ApiRequest, HttpMethod, RequestBuilder};
pub use traits::NoteSender;

use crate::errors::PushError;
use crate::pushbullet::AccessToken;
use crate::shared::config::PushbulletConfig;

/// Create an async client from the `[pushbullet]` config section
pub fn create_async_client_from_config(
    token: AccessToken,
    config: &PushbulletConfig,
) -> Result<AsyncPushbulletClient, PushError> {
    AsyncPushbulletClient::new(token, PushbulletClientConfig::from(config))
}

/// Create a blocking client from the `[pushbullet]` config section
pub fn create_sync_client_from_config(
    token: AccessToken,
    config: &PushbulletConfig,
) -> Result<PushbulletClient, PushError> {
    PushbulletClient::new(token, PushbulletClientConfig::from(config))
}
