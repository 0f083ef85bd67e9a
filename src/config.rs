use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::request::DEFAULT_HEADER_CAPACITY;

/// Command-line arguments.
///
/// The port and document root are required; everything else lives in an
/// optional YAML settings file.
#[derive(Debug, Parser)]
#[command(name = "hearth")]
#[command(about = "Persistent-connection HTTP/1.x static file server")]
pub struct Args {
    /// Port to listen on
    pub port: u16,

    /// Directory (or single file) served as the document root
    pub root: PathBuf,

    /// Optional YAML settings file
    #[arg(long, env = "HEARTH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to, combined with the port argument.
    pub host: String,
    /// Inactivity deadline on a connection, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// File served when a client asks for `/`.
    pub index: String,
    /// How many request headers are kept before further ones are dropped.
    pub max_headers: usize,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            index: "index.html".to_string(),
            max_headers: DEFAULT_HEADER_CAPACITY,
        }
    }
}

/// Shape of the optional settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    server: ServerConfig,
    static_files: StaticFilesConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub root: PathBuf,
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let settings = match &args.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading settings file {}", path.display()))?;
                serde_yaml::from_str(&text)
                    .with_context(|| format!("parsing settings file {}", path.display()))?
            }
            None => Settings::default(),
        };

        // the root must exist up front; anything else is a startup error
        let meta = std::fs::metadata(&args.root)
            .with_context(|| format!("invalid root path: {}", args.root.display()))?;
        if !meta.is_dir() && !meta.is_file() {
            anyhow::bail!("invalid root path: {}", args.root.display());
        }

        Ok(Self {
            listen_addr: format!("{}:{}", settings.server.host, args.port),
            root: args.root,
            server: settings.server,
            static_files: settings.static_files,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.server.timeout_ms)
    }
}
