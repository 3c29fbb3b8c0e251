use std::collections::HashMap;

/// Extension used to look up the content type of plain-text error bodies.
pub const PLAIN_TEXT_EXTENSION: &str = "txt";

/// Maps file extensions to content types.
///
/// Built once at startup and shared read-only. Unknown extensions map to an
/// empty content type rather than a guessed default.
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    types: HashMap<&'static str, &'static str>,
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        let types = HashMap::from([
            ("png", "image/png"),
            ("css", "text/css"),
            ("js", "text/javascript"),
            ("html", "text/html"),
            ("txt", "text/plaintext"),
        ]);

        Self { types }
    }
}

impl ContentTypeTable {
    pub fn lookup(&self, extension: &str) -> Option<&'static str> {
        self.types.get(extension).copied()
    }

    /// Content type for a URI, keyed on the text after its last `.`.
    ///
    /// A URI without a dot is looked up as a whole and so normally misses.
    /// Misses yield `""`.
    pub fn for_uri(&self, uri: &str) -> &'static str {
        let extension = uri.rsplit('.').next().unwrap_or(uri);
        self.lookup(extension).unwrap_or("")
    }

    /// Content type used for error bodies.
    pub fn plain_text(&self) -> &'static str {
        self.lookup(PLAIN_TEXT_EXTENSION).unwrap_or("")
    }
}
