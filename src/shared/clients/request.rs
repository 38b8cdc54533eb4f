//! Request construction for the Pushbullet API
//!
//! Requests are built as plain data (`ApiRequest`) before anything touches
//! the network, so they can be inspected by tests and printed by
//! `--dry-run`. The transport in [`super::pushbullet`] turns them into
//! reqwest calls.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::errors::PushError;
use crate::pushbullet::{AccessToken, Endpoint, NoteMessage, ACCESS_TOKEN_HEADER, REQUEST_TIMEOUT};

/// HTTP methods used by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A fully specified request, described as plain data
#[derive(Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Human-readable rendering with the access token masked
    pub fn describe(&self) -> String {
        let mut out = format!("{} {}\n", self.method.as_str(), self.url);
        for (name, value) in &self.headers {
            let shown = if name.eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
                "<redacted>"
            } else {
                value.as_str()
            };
            out.push_str(&format!("{name}: {shown}\n"));
        }
        out.push_str(&format!("Timeout: {}s\n", self.timeout.as_secs()));
        if let Some(body) = &self.body {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builds `ApiRequest`s for one access token against one API base
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    token: AccessToken,
}

impl RequestBuilder {
    pub fn new(base_url: &str, token: AccessToken) -> Result<Self, PushError> {
        HeaderValue::from_str(token.expose())
            .map_err(|_| PushError::runtime("access token is not a valid header value"))?;

        // Url::join replaces the last segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| PushError::runtime(format!("invalid API base URL '{base_url}': {e}")))?;

        Ok(Self { base_url, token })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, PushError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| PushError::runtime(format!("failed to build URL for {endpoint}: {e}")))
    }

    /// Build a request for any endpoint, serializing `payload` as JSON
    pub fn build<T: Serialize>(
        &self,
        method: HttpMethod,
        endpoint: Endpoint,
        payload: Option<&T>,
    ) -> Result<ApiRequest, PushError> {
        let body = payload
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| PushError::runtime(format!("JSON encode error: {e}")))?;

        Ok(ApiRequest {
            method,
            url: self.endpoint_url(endpoint)?,
            headers: vec![
                (CONTENT_TYPE.as_str().to_string(), "application/json".to_string()),
                (ACCESS_TOKEN_HEADER.to_string(), self.token.expose().to_string()),
            ],
            body,
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn account_info(&self) -> Result<ApiRequest, PushError> {
        self.build::<()>(HttpMethod::Get, Endpoint::AccountInfo, None)
    }

    pub fn push_note(&self, note: &NoteMessage) -> Result<ApiRequest, PushError> {
        self.build(HttpMethod::Post, Endpoint::Push, Some(note))
    }
}
