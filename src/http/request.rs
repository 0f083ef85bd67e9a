use std::path::PathBuf;

/// Header capacity used when none is configured.
pub const DEFAULT_HEADER_CAPACITY: usize = 6;

/// Returned when an insert would exceed the configured header capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderOverflow;

/// An ordered name/value map with a fixed capacity.
///
/// Insertion order is preserved and duplicates are allowed; lookups return
/// the first entry whose name matches exactly (names are compared
/// case-sensitively). Entries past capacity are refused, and the map keeps
/// count of how many were turned away.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
    capacity: usize,
    dropped: usize,
}

impl HeaderMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), HeaderOverflow> {
        if self.entries.len() >= self.capacity {
            self.dropped += 1;
            return Err(HeaderOverflow);
        }
        self.entries.push((name.into(), value.into()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many inserts were refused for lack of capacity.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// A parsed client request.
///
/// The method and version stay plain strings: an unknown method must still
/// reach the status decision so it can be answered with 405 rather than
/// rejected at parse time.
#[derive(Debug, Clone)]
pub struct Request {
    /// The request method token, verbatim (e.g. "GET", "POST")
    pub method: String,
    /// The resource as the client asked for it, with `/` already rewritten
    /// to the index file
    pub resource: String,
    /// Document root + resource, concatenated verbatim
    pub path: PathBuf,
    /// Protocol version token, "HTTP/1.1" when the client omitted it
    pub version: String,
    /// Request headers in arrival order
    pub headers: HeaderMap,
}

impl Request {
    /// Retrieves a header value by name (first match, exact case).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn if_modified_since(&self) -> Option<&str> {
        self.header("If-Modified-Since")
    }

    /// Whether the client asked to close the connection after the response.
    /// Observed for logging only; the connection stays open until the
    /// inactivity deadline regardless.
    pub fn wants_close(&self) -> bool {
        self.header("Connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}
