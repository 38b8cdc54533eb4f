use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::error::Error as _;
use tracing::{debug, info, warn};

use super::bridge::Bridge;
use super::classify::{classify, HttpOutcome};
use super::request::{ApiRequest, RequestBuilder};
use super::traits::NoteSender;
use crate::errors::PushError;
use crate::pushbullet::{AccessToken, NoteMessage, ACCESS_TOKEN_HEADER, API_BASE_URL};

/// Configuration for the Pushbullet client
///
/// The request timeout is fixed; see [`crate::pushbullet::REQUEST_TIMEOUT`].
#[derive(Debug, Clone)]
pub struct PushbulletClientConfig {
    pub api_base: String,
    pub user_agent: Option<String>,
}

impl Default for PushbulletClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE_URL.to_string(),
            user_agent: Some(concat!("spush/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl From<&crate::shared::config::PushbulletConfig> for PushbulletClientConfig {
    fn from(config: &crate::shared::config::PushbulletConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            ..Default::default()
        }
    }
}

/// Primary async Pushbullet client
///
/// Holds the access token for its whole lifetime and no other state, so
/// clones and concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct AsyncPushbulletClient {
    client: Client,
    requests: RequestBuilder,
}

impl AsyncPushbulletClient {
    pub fn new(token: AccessToken, config: PushbulletClientConfig) -> Result<Self, PushError> {
        let requests = RequestBuilder::new(&config.api_base, token)?;

        let mut client_builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }
        let client = client_builder
            .build()
            .map_err(|e| PushError::runtime(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, requests })
    }

    /// Client against the public Pushbullet API
    pub fn with_token(token: AccessToken) -> Result<Self, PushError> {
        Self::new(token, PushbulletClientConfig::default())
    }

    /// Create a blocking wrapper around this client
    pub fn blocking(self) -> Result<PushbulletClient, PushError> {
        PushbulletClient::from_async(self)
    }

    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Run one request through dispatch and classification
    pub async fn execute(&self, request: ApiRequest) -> Result<String, PushError> {
        let prepared = self.prepare(&request)?;
        let outcome = dispatch(self.client.clone(), prepared).await;
        finish(&request, outcome)
    }

    /// Turn plain request data into a reqwest request
    fn prepare(&self, request: &ApiRequest) -> Result<reqwest::Request, PushError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| PushError::runtime(format!("invalid header name '{name}'")))?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|_| PushError::runtime(format!("invalid value for header '{name}'")))?;
            if name.eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .headers(headers)
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        builder
            .build()
            .map_err(|e| PushError::runtime(format!("failed to build request: {e}")))
    }
}

#[async_trait]
impl NoteSender for AsyncPushbulletClient {
    async fn push_note(&self, title: &str, body: &str) -> Result<String, PushError> {
        let request = self.requests.push_note(&NoteMessage::new(title, body))?;
        self.execute(request).await
    }

    async fn fetch_account_info(&self) -> Result<String, PushError> {
        let request = self.requests.account_info()?;
        self.execute(request).await
    }
}

/// Blocking Pushbullet client
///
/// Wraps [`AsyncPushbulletClient`] and runs each call on a private runtime
/// through [`Bridge`]. Calls block the current thread for one round trip.
/// Safe to share between threads. From async code prefer the async client:
/// blocking is refused on a current-thread runtime.
pub struct PushbulletClient {
    inner: AsyncPushbulletClient,
    bridge: Bridge,
}

impl PushbulletClient {
    pub fn new(token: AccessToken, config: PushbulletClientConfig) -> Result<Self, PushError> {
        Self::from_async(AsyncPushbulletClient::new(token, config)?)
    }

    pub fn with_token(token: AccessToken) -> Result<Self, PushError> {
        Self::new(token, PushbulletClientConfig::default())
    }

    pub fn from_async(inner: AsyncPushbulletClient) -> Result<Self, PushError> {
        Ok(Self {
            inner,
            bridge: Bridge::new()?,
        })
    }

    /// Push a note (blocking)
    pub fn push_note(&self, title: &str, body: &str) -> Result<String, PushError> {
        let request = self.inner.requests.push_note(&NoteMessage::new(title, body))?;
        self.execute(request)
    }

    /// Fetch account info (blocking)
    pub fn fetch_account_info(&self) -> Result<String, PushError> {
        let request = self.inner.requests.account_info()?;
        self.execute(request)
    }

    pub fn execute(&self, request: ApiRequest) -> Result<String, PushError> {
        let prepared = self.inner.prepare(&request)?;
        let outcome = self
            .bridge
            .execute(dispatch(self.inner.client.clone(), prepared))?;
        finish(&request, outcome)
    }
}

/// Send a prepared request and collect whatever came back
async fn dispatch(client: Client, request: reqwest::Request) -> HttpOutcome {
    debug!(method = %request.method(), url = %request.url(), "dispatching request");

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => return HttpOutcome::Transport(error_chain(&e)),
    };

    let status = response.status().as_u16();
    match response.bytes().await {
        Ok(body) => HttpOutcome::Response {
            status,
            body: body.to_vec(),
        },
        Err(e) if e.is_timeout() => HttpOutcome::Transport(error_chain(&e)),
        Err(e) => {
            debug!(status, error = %e, "response body could not be read");
            HttpOutcome::Empty
        }
    }
}

fn finish(request: &ApiRequest, outcome: HttpOutcome) -> Result<String, PushError> {
    let result = classify(outcome);
    match &result {
        Ok(body) => info!(url = %request.url, bytes = body.len(), "request succeeded"),
        Err(e) => warn!(url = %request.url, category = e.category(), error = %e, "request failed"),
    }
    result
}

/// Flatten an error and its sources into one message
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
