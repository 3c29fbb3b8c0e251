use std::fmt;

/// HTTP request verbs.
///
/// Only GET is served. The other known verbs, and any token the server does not
/// recognise, are rejected by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// GET - Retrieve a resource
    GET,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// POST - Create or submit data
    POST,
    /// Any other token, kept verbatim for error reporting
    Unknown(String),
}

impl Verb {
    /// Maps a request-line token to a verb.
    ///
    /// Matching is case-sensitive; anything outside the table becomes
    /// [`Verb::Unknown`] carrying the original token.
    ///
    /// # Example
    ///
    /// ```
    /// # use funnel::http::request::Verb;
    /// assert_eq!(Verb::from_token("GET"), Verb::GET);
    /// assert_eq!(Verb::from_token("get"), Verb::Unknown("get".to_string()));
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Verb::GET,
            "PUT" => Verb::PUT,
            "DELETE" => Verb::DELETE,
            "POST" => Verb::POST,
            other => Verb::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Verb::GET => "GET",
            Verb::PUT => "PUT",
            Verb::DELETE => "DELETE",
            Verb::POST => "POST",
            Verb::Unknown(token) => token,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `key: value` header line. Both sides are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// A parsed request line plus headers.
///
/// Headers keep the order they arrived in, and repeated keys are kept as
/// separate entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub verb: Verb,
    /// Bare version number such as `"1.1"`
    pub version: String,
    /// Requested URI, never empty
    pub uri: String,
    pub headers: Vec<Header>,
}

impl Request {
    /// First header whose key matches exactly.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }

    /// Every value recorded under `key`, in request order.
    pub fn header_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.key == key)
            .map(|h| h.value.as_str())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} version {}", self.verb, self.uri, self.version)?;
        for header in &self.headers {
            write!(f, " {}", header)?;
        }
        Ok(())
    }
}
