//! Hearth - Persistent Static File Server
//!
//! Core library for the HTTP protocol engine and serving plumbing.

pub mod config;
pub mod http;
pub mod server;
