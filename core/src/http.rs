//! HTTP transport types and the transport capability.
//!
//! # Design
//! Requests and responses are plain data except for the response body, which
//! stays a reader so the transport decides when bytes are pulled off the wire.
//! The body is owned by `HttpResponse` and released when the response is
//! dropped, so every exit path of the executor closes it.
//!
//! `HttpClient` is the only seam to the network. The executor never talks to
//! a socket directly; tests plug in scripted clients and production code uses
//! [`UreqClient`](crate::transport::UreqClient).

use std::fmt;
use std::io::Read;

use crate::error::BoxError;

/// Common HTTP methods. The executor carries the method as a string, so any
/// verb is accepted; this enum only names the usual ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// An HTTP request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Set a header, replacing any existing header whose name matches
    /// case-insensitively.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => self.headers.push((name, value)),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response returned by the transport.
///
/// `request` is the originating request when the transport keeps it; the
/// default status handler uses it for diagnostics.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
    pub request: Option<HttpRequest>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + 'static) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Box::new(body),
            request: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_request(mut self, request: HttpRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Status code followed by its canonical reason, e.g. `404 Not Found`.
    pub fn status_line(&self) -> String {
        let reason = ureq::http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason());
        match reason {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }

    /// Read the remaining body to the end.
    pub fn read_body(&mut self) -> std::io::Result<Vec<u8>> {
        let mut data = Vec::new();
        self.body.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// The transport capability: sends one request and returns its response.
///
/// Non-success statuses are responses, not errors. Implementations may be
/// shared across threads.
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
