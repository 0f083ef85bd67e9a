#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use hearth::config::{Config, ServerConfig, StaticFilesConfig};

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// A throwaway document root under the OS temp dir, removed on drop.
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("hearth-test-{}-{}", std::process::id(), id));
        fs::create_dir_all(&path).expect("create temp root");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let file = self.path.join(name);
        fs::write(&file, contents).expect("write test file");
        file
    }

    pub fn make_dir(&self, name: &str) -> PathBuf {
        let dir = self.path.join(name);
        fs::create_dir_all(&dir).expect("create test dir");
        dir
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub fn test_config(root: &Path) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        root: root.to_path_buf(),
        server: ServerConfig::default(),
        static_files: StaticFilesConfig::default(),
    }
}
