use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// One outbound HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A header-less GET, the default request shape
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(url)
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach an already-encoded JSON body and declare its content type
    pub fn json_body(self, body: Vec<u8>) -> Self {
        let mut request = self.header(CONTENT_TYPE.as_str(), "application/json");
        request.body = Some(body);
        request
    }

    /// Look up a header value by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response handed back to callers; the status is not interpreted here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// `status_text` is the canonical reason for `status`, not whatever
    /// phrase the server put on its status line.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text_for(status),
            body: body.into(),
        }
    }

    /// True for any status in 200..=299
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Canonical reason phrase for a status code, or `HTTP <code>` for unknown ones
pub fn status_text_for(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// Failure to obtain any response for a request
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {}ms", .timeout.as_millis())]
    DeadlineExceeded { timeout: Duration },

    #[error("network unreachable: {0}")]
    Unreachable(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    /// Deadline and network failures are transient; everything else is final
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::DeadlineExceeded { .. } | TransportError::Unreachable(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::DeadlineExceeded { .. })
    }
}

/// The request primitive the resilient layer is built on
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Map a reqwest failure onto the retryable/non-retryable split
fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Other(err.to_string())
    } else if err.is_connect() || err.is_request() || err.is_body() || err.is_timeout() {
        TransportError::Unreachable(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
