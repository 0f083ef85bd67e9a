//! HTTP protocol engine.
//!
//! This module implements the request/response engine for a persistent
//! HTTP/1.x connection serving static files.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The connection handler driving the parse/dispatch state machine
//! - **`parser`**: Incremental, line-by-line request parsing
//! - **`request`**: Request representation and the bounded header map
//! - **`status`**: Status-code decision for a completed request
//! - **`conditional`**: If-Modified-Since evaluation
//! - **`response`**: Response-byte generation per status code
//! - **`writer`**: Serializes response bytes to the client
//! - **`mime`**: Content-type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection cycles through parse phases until it goes idle
//! past the deadline:
//!
//! ```text
//!        ┌─────────────────────┐
//!        │ AwaitingRequestLine │ ← Wait for a request line
//!        └──────────┬──────────┘
//!                   │ Method / path / version parsed
//!                   ▼
//!        ┌─────────────────────┐
//!        │   AwaitingHeaders   │ ← Collect optional headers
//!        └──────────┬──────────┘
//!                   │ Empty line (end of headers)
//!                   ▼
//!        ┌─────────────────────┐
//!        │      Dispatch       │ ← Decide status, generate and send bytes
//!        └──────────┬──────────┘
//!                   │ Response sent
//!                   └─ back to AwaitingRequestLine (same connection)
//!
//!        Any phase ─ 10s of silence → timeout notice, connection closed
//! ```

pub mod conditional;
pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
