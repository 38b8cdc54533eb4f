//! Classification of raw HTTP outcomes into push results

use crate::errors::PushError;

/// What one HTTP round trip produced, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    /// The transport failed (DNS, connect, TLS, timeout)
    Transport(String),
    /// No error was reported, but there is no usable status or body
    Empty,
    /// The server answered
    Response { status: u16, body: Vec<u8> },
}

/// Map an outcome to the body text or a typed error
pub fn classify(outcome: HttpOutcome) -> Result<String, PushError> {
    match outcome {
        HttpOutcome::Transport(message) => Err(PushError::network(message)),
        HttpOutcome::Empty => Err(PushError::network("empty response")),
        HttpOutcome::Response { status, body } => match status {
            200..=299 => Ok(String::from_utf8_lossy(&body).into_owned()),
            401 | 403 => Err(PushError::invalid_api_key(status)),
            429 => Err(PushError::too_many_requests()),
            _ => Err(PushError::network_status(status)),
        },
    }
}
