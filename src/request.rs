//! Generic JSON request helper.
//!
//! Failures never reach the caller: they are logged and the helper yields
//! `None`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(FetchError::UnsupportedMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("network error for {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a request and returns the raw response body.
pub trait FetchTransport: fmt::Debug {
    fn fetch(&mut self, request: &FetchRequest) -> Result<String, FetchError>;
}

/// In-memory transport answering from canned bodies keyed by URL.
#[derive(Debug, Default, Clone)]
pub struct MockFetch {
    mocks: HashMap<String, String>,
    calls: Vec<FetchRequest>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mock(&mut self, url: &str, body: &str) {
        self.mocks.insert(url.to_string(), body.to_string());
    }

    pub fn clear_mocks(&mut self) {
        self.mocks.clear();
    }

    pub fn take_calls(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.calls)
    }
}

impl FetchTransport for MockFetch {
    fn fetch(&mut self, request: &FetchRequest) -> Result<String, FetchError> {
        self.calls.push(request.clone());
        self.mocks
            .get(&request.url)
            .cloned()
            .ok_or_else(|| FetchError::Network {
                url: request.url.clone(),
                reason: "no mock response registered".into(),
            })
    }
}

/// Issues a JSON request and returns the parsed response, or `None` after
/// logging when anything fails.
pub fn make_request(
    transport: &mut dyn FetchTransport,
    url: &str,
    method: Method,
    payload: Option<&Value>,
) -> Option<Value> {
    match try_request(transport, url, method, payload) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(%url, %method, "request failed: {err}");
            None
        }
    }
}

fn try_request(
    transport: &mut dyn FetchTransport,
    url: &str,
    method: Method,
    payload: Option<&Value>,
) -> Result<Value, FetchError> {
    let body = payload
        .filter(|value| !value.is_null())
        .map(serde_json::to_string)
        .transpose()
        .map_err(|err| FetchError::Encode(err.to_string()))?;
    let request = FetchRequest {
        url: url.to_string(),
        method,
        headers: vec![("Content-Type".into(), "application/json".into())],
        body,
    };
    let raw = transport.fetch(&request)?;
    serde_json::from_str(&raw).map_err(|err| FetchError::Decode(err.to_string()))
}
