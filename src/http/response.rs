use bytes::Bytes;

use crate::http::request::Header;

/// Version written in the status line unless a response overrides it.
pub const DEFAULT_VERSION: &str = "1.0";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): file served
/// - `NotFound` (404): file missing, or verb not supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use funnel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete response ready to be written to a client.
///
/// On failure paths `status_text` carries a human-readable error message
/// (for example `File not found`) instead of a canonical reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Bare version number, `"1.0"` by default
    pub version: String,
    pub status_code: u16,
    pub status_text: String,
    /// Headers in the order they are written
    pub headers: Vec<Header>,
    pub body: Bytes,
}

/// Builder for constructing responses in a fluent style.
///
/// # Example
///
/// ```
/// # use funnel::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body("<h1>hi</h1>")
///     .build();
///
/// assert_eq!(response.header("Content-Length"), Some("11"));
/// ```
pub struct ResponseBuilder {
    version: String,
    status_code: u16,
    status_text: String,
    headers: Vec<Header>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a builder whose status text is the code's reason phrase.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            status_code: status.as_u16(),
            status_text: status.reason_phrase().to_string(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replaces the status text, e.g. with an error message.
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Appends a header. Existing headers with the same key are kept.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// A non-empty body always leaves with a `Content-Type` (empty when none
    /// was given) and a `Content-Length` equal to the body length; any
    /// `Content-Length` set by hand is replaced.
    pub fn build(mut self) -> Response {
        if !self.body.is_empty() {
            if !self.headers.iter().any(|h| h.key == "Content-Type") {
                self.headers.push(Header::new("Content-Type", ""));
            }
            self.headers.retain(|h| h.key != "Content-Length");
            self.headers
                .push(Header::new("Content-Length", self.body.len().to_string()));
        }

        Response {
            version: self.version,
            status_code: self.status_code,
            status_text: self.status_text,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A 200 response carrying `body` as `content_type`.
    pub fn success(content_type: &str, body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(body)
            .build()
    }

    /// A 404 response whose status text is `message`. No headers, no body.
    pub fn failure(message: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .status_text(message)
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }

    /// `HTTP/<version> <code> <text>`
    pub fn status_line(&self) -> String {
        format!(
            "HTTP/{} {} {}",
            self.version, self.status_code, self.status_text
        )
    }
}
