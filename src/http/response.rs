use std::fs;
use std::time::SystemTime;

use httpdate::fmt_http_date;

use crate::http::mime;
use crate::http::request::Request;
use crate::http::status::{ResponseStatus, StatusCode};

/// Build the exact bytes answering `request` with `status`.
///
/// Only a readable 200 carries a body, separated from its headers by a
/// blank line. Every other status is the status line plus its fixed header
/// set, ending right after the last header line; that is the wire shape
/// this server has always produced. A 200 whose file cannot be read (or
/// stat'ed) degrades to the headers-only shape as well.
///
/// The mtime header on a 200 is spelled `Last modified`; the one on a 304
/// is `Last-Modified`.
pub fn generate(status: &ResponseStatus, request: &Request) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(status.status_line().as_bytes());

    match status.code {
        StatusCode::NotModified => {
            if let Some(mtime) = modified_time(request) {
                push_header(&mut buf, "Last-Modified", &fmt_http_date(mtime));
            }
            push_header(&mut buf, "Connection", "Keep-Alive");
        }

        StatusCode::MethodNotAllowed => {
            push_header(&mut buf, "Allow", "GET");
            push_header(&mut buf, "Connection", "Keep-Alive");
        }

        StatusCode::VersionNotSupported | StatusCode::NotFound => {
            push_header(&mut buf, "Connection", "Keep-Alive");
        }

        StatusCode::Ok => {
            let Ok(meta) = fs::metadata(&request.path) else {
                // the file vanished between the decision and now
                push_header(&mut buf, "Connection", "Keep-Alive");
                return buf;
            };

            let path = request.path.display().to_string();
            push_header(&mut buf, "Content-Length", &meta.len().to_string());
            push_header(&mut buf, "Content-Type", mime::mime_type(&path));
            push_header(&mut buf, "Date", &fmt_http_date(SystemTime::now()));
            if let Ok(mtime) = meta.modified() {
                push_header(&mut buf, "Last modified", &fmt_http_date(mtime));
            }
            push_header(&mut buf, "Connection", "Keep-Alive");

            match fs::read(&request.path) {
                Ok(body) => {
                    buf.extend_from_slice(b"\r\n");
                    buf.extend_from_slice(&body);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %request.path.display(),
                        error = %e,
                        "resource not readable, sending headers only"
                    );
                }
            }
        }
    }

    buf
}

fn modified_time(request: &Request) -> Option<SystemTime> {
    fs::metadata(&request.path).and_then(|m| m.modified()).ok()
}

fn push_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}
