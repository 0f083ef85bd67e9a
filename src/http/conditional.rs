//! If-Modified-Since evaluation.

use std::time::{SystemTime, UNIX_EPOCH};

/// Outcome of comparing a resource's modification time with the timestamp
/// a client supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Modified,
    NotModified,
}

/// Compare a file's modification time against an `If-Modified-Since` value.
///
/// The value is parsed as an RFC-1123-style HTTP date. The resource counts
/// as modified only when its mtime is strictly newer, at whole-second
/// resolution. A value that does not parse counts as modified, so the
/// client still gets the full resource.
pub fn evaluate(header_value: &str, mtime: SystemTime) -> Freshness {
    match httpdate::parse_http_date(header_value) {
        Ok(header_time) => {
            if epoch_secs(mtime) > epoch_secs(header_time) {
                Freshness::Modified
            } else {
                Freshness::NotModified
            }
        }
        Err(_) => Freshness::Modified,
    }
}

fn epoch_secs(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
