//! HTTP seam between the API client and whatever actually moves bytes
//! (gloo-net in the browser, a script in tests).

use async_trait::async_trait;
use contracts::shared::payload::MultipartForm;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Encoded by the transport; it owns the boundary and content type
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout_ms: u32,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: RequestBody::Empty,
            timeout_ms: 0,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Set a header, replacing any previous value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; `None` for empty or non-JSON bodies
    pub body: Option<Value>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Timeout,
    Network(String),
}

/// Sends one request. Implementations apply `timeout_ms` when non-zero and
/// never retry on their own.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Parse a response body as JSON, treating empty and non-JSON text as absent.
pub fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces() {
        let mut request = HttpRequest::new(Method::Get, "http://x/banks/");
        request.set_header("Authorization", "Bearer a");
        request.set_header("authorization", "Bearer b");
        assert_eq!(request.header("Authorization"), Some("Bearer b"));
        assert_eq!(
            request.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("authorization")).count(),
            1
        );
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("<html>"), None);
        assert_eq!(parse_body("[1]"), Some(serde_json::json!([1])));
    }
}
