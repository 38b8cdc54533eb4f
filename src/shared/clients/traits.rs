use async_trait::async_trait;

use crate::errors::PushError;

/// Anything that can deliver a note to Pushbullet
///
/// Implemented by [`super::AsyncPushbulletClient`]; the CLI handlers depend
/// on this trait so they can be exercised without a network.
#[async_trait]
pub trait NoteSender: Send + Sync {
    /// Push a note and return the raw response body
    async fn push_note(&self, title: &str, body: &str) -> Result<String, PushError>;

    /// Fetch the account the token belongs to, as raw JSON text
    async fn fetch_account_info(&self) -> Result<String, PushError>;
}
