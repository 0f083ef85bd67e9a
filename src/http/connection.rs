use std::time::{Duration, Instant};

use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::config::Config;
use crate::http::parser::{ParseEvent, RequestParser};
use crate::http::response;
use crate::http::status;
use crate::http::writer::ResponseWriter;

/// Raw reply for malformed request or header lines. Written verbatim,
/// never built by the response generator.
const BAD_REQUEST: &[u8] = b"HTTP/1.0 400 Bad Request\nConnection: keep-alive\n";

/// Farewell written to a client that stayed silent past the deadline.
const TIMEOUT_NOTICE: &[u8] = b"\nConnection to server lost\n";

/// One client connection: stream, read buffer, parser and idle deadline.
///
/// The connection serves any number of requests back to back; it ends when
/// the peer hangs up, an I/O error hits, or nothing arrives within the
/// configured inactivity window.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    parser: RequestParser,
    timeout: Duration,
    last_activity: Instant,
}

impl Connection {
    pub fn new(stream: TcpStream, cfg: &Config) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            parser: RequestParser::new(cfg),
            timeout: cfg.timeout(),
            last_activity: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            // feed every complete line already buffered before reading more
            while let Some(line) = next_line(&mut self.buffer) {
                self.handle_line(&line).await?;
            }

            let remaining = self.timeout.saturating_sub(self.last_activity.elapsed());
            if remaining.is_zero() {
                return self.close_timed_out().await;
            }

            match tokio::time::timeout(remaining, self.stream.read_buf(&mut self.buffer)).await {
                Err(_) => return self.close_timed_out().await,

                Ok(Ok(0)) => {
                    tracing::info!("peer closed connection");
                    return Ok(());
                }

                Ok(Ok(_)) => {
                    self.last_activity = Instant::now();
                }

                Ok(Err(e)) => return Err(e.into()),
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        match self.parser.feed_line(line) {
            Ok(ParseEvent::Incomplete) => Ok(()),

            Ok(ParseEvent::Complete(request)) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path.display(),
                    version = %request.version,
                    "dispatching request"
                );
                for (name, value) in request.headers.iter() {
                    tracing::debug!("{}: {}", name, value);
                }
                if request.wants_close() {
                    // parsed but never honored; the connection stays open
                    // until the inactivity deadline
                    tracing::debug!("client asked for Connection: close, ignoring");
                }

                let status = status::decide(&request);
                let bytes = response::generate(&status, &request);
                ResponseWriter::new(bytes)
                    .write_to_stream(&mut self.stream)
                    .await
            }

            Err(e) => {
                tracing::warn!(error = ?e, "malformed line, answering 400");
                ResponseWriter::new(BAD_REQUEST.to_vec())
                    .write_to_stream(&mut self.stream)
                    .await
            }
        }
    }

    async fn close_timed_out(&mut self) -> anyhow::Result<()> {
        tracing::info!("connection timed out");
        // best effort; the peer may already be gone
        let _ = ResponseWriter::new(TIMEOUT_NOTICE.to_vec())
            .write_to_stream(&mut self.stream)
            .await;
        Ok(())
    }
}

/// Pop one `\n`-terminated line off the buffer, dropping the terminator
/// and any preceding `\r`. Bytes are decoded lossily, so a line that is
/// not UTF-8 still reaches the parser as text.
fn next_line(buffer: &mut BytesMut) -> Option<String> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let line = buffer.split_to(pos + 1);

    let mut end = line.len() - 1;
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }

    Some(String::from_utf8_lossy(&line[..end]).into_owned())
}
