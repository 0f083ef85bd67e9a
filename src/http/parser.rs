use std::path::PathBuf;

use crate::config::Config;
use crate::http::request::{HeaderMap, Request};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Request line carried four or more whitespace-separated tokens.
    TooManyTokens,
    /// Empty or single-character line where a request or header line was
    /// expected.
    ShortLine,
    /// Header line without a `:` separator.
    MissingColon,
}

/// Where the parser is within the current request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRequestLine,
    AwaitingHeaders,
}

#[derive(Debug)]
pub enum ParseEvent {
    /// The request needs more lines.
    Incomplete,
    /// A full request is ready for dispatch.
    Complete(Request),
}

enum ParseState {
    AwaitingRequestLine,
    AwaitingHeaders(Request),
}

/// Incremental request parser fed one line at a time.
///
/// The in-progress request travels with the parse state, so completing a
/// request hands it out by value and leaves the parser ready for the next
/// one on the same connection.
pub struct RequestParser {
    root: String,
    index: String,
    header_capacity: usize,
    state: ParseState,
}

impl RequestParser {
    pub fn new(cfg: &Config) -> Self {
        Self {
            root: cfg.root.display().to_string(),
            index: cfg.static_files.index.clone(),
            header_capacity: cfg.static_files.max_headers,
            state: ParseState::AwaitingRequestLine,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            ParseState::AwaitingRequestLine => Phase::AwaitingRequestLine,
            ParseState::AwaitingHeaders(_) => Phase::AwaitingHeaders,
        }
    }

    /// Feed one line, already stripped of its `\r\n` / `\n` terminator.
    ///
    /// Errors leave the parse phase unchanged; the caller answers them with
    /// a 400 and the connection carries on.
    pub fn feed_line(&mut self, line: &str) -> Result<ParseEvent, ParseError> {
        match std::mem::replace(&mut self.state, ParseState::AwaitingRequestLine) {
            ParseState::AwaitingRequestLine => self.request_line(line),
            ParseState::AwaitingHeaders(request) => self.header_line(line, request),
        }
    }

    fn request_line(&mut self, line: &str) -> Result<ParseEvent, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ParseError::ShortLine);
        }
        if tokens.len() > 3 {
            return Err(ParseError::TooManyTokens);
        }

        let method = tokens[0].to_string();
        let mut resource = tokens.get(1).copied().unwrap_or("").to_string();
        let version = tokens.get(2).copied().unwrap_or("HTTP/1.1").to_string();

        if resource == "/" {
            resource = format!("/{}", self.index);
        }

        // the resource is appended to the root verbatim; nothing stops a
        // `..` segment from escaping the root
        let path = PathBuf::from(format!("{}{}", self.root, resource));

        self.state = ParseState::AwaitingHeaders(Request {
            method,
            resource,
            path,
            version,
            headers: HeaderMap::with_capacity(self.header_capacity),
        });
        Ok(ParseEvent::Incomplete)
    }

    fn header_line(&mut self, line: &str, mut request: Request) -> Result<ParseEvent, ParseError> {
        // an empty line ends the headers; so does a line that already looks
        // like the next GET request line, which gets discarded
        if line.is_empty() || line.starts_with("GET") {
            return Ok(ParseEvent::Complete(request));
        }

        let event = if line.len() <= 1 {
            Err(ParseError::ShortLine)
        } else if let Some((name, value)) = line.split_once(':') {
            let value = value.strip_prefix(' ').unwrap_or(value);
            if request.headers.insert(name, value).is_err() {
                tracing::warn!(header = name, "header capacity reached, dropping header");
            }
            Ok(ParseEvent::Incomplete)
        } else {
            Err(ParseError::MissingColon)
        };

        self.state = ParseState::AwaitingHeaders(request);
        event
    }
}
