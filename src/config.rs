//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::CacheConfig;

/// Default number of documents kept
pub const DEFAULT_MAX_FILES: usize = 5;

/// Default per-document limit (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default storage budget and quota (5 MiB)
pub const DEFAULT_STORAGE_BUDGET: usize = 5 * 1024 * 1024;

/// Default key the collection is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "uploadedPdfs";

// == Backend Kind ==
/// Which storage backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// One file per key under `storage_dir`
    File,
    /// Process memory, lost on restart
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of documents resident at once
    pub max_files: usize,
    /// Maximum original size of a single document in bytes
    pub max_file_size: usize,
    /// Storage ceiling reported by the usage endpoint
    pub storage_budget_bytes: usize,
    /// Byte quota enforced by the backend, None = unbounded
    pub storage_quota_bytes: Option<usize>,
    /// Key the document collection is persisted under
    pub storage_key: String,
    /// Storage backend selection
    pub storage_backend: BackendKind,
    /// Directory for the file backend
    pub storage_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_FILES` - Documents kept before eviction (default: 5, minimum 1)
    /// - `MAX_FILE_SIZE` - Per-document byte limit (default: 10 MiB)
    /// - `STORAGE_BUDGET_BYTES` - Reported storage ceiling (default: 5 MiB)
    /// - `STORAGE_QUOTA_BYTES` - Backend quota, 0 disables (default: 5 MiB)
    /// - `STORAGE_KEY` - Persisted key (default: `uploadedPdfs`)
    /// - `STORAGE_BACKEND` - `file` or `memory` (default: file)
    /// - `STORAGE_DIR` - File backend directory (default: ./data)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let quota: usize = parse_env("STORAGE_QUOTA_BYTES").unwrap_or(DEFAULT_STORAGE_BUDGET);

        Self {
            max_files: parse_env("MAX_FILES")
                .unwrap_or(defaults.max_files)
                .max(1),
            max_file_size: parse_env("MAX_FILE_SIZE").unwrap_or(defaults.max_file_size),
            storage_budget_bytes: parse_env("STORAGE_BUDGET_BYTES")
                .unwrap_or(defaults.storage_budget_bytes),
            storage_quota_bytes: (quota > 0).then_some(quota),
            storage_key: env::var("STORAGE_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .unwrap_or(defaults.storage_key),
            storage_backend: parse_env("STORAGE_BACKEND").unwrap_or(defaults.storage_backend),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Cache limits carried by this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_files: self.max_files,
            max_file_size: self.max_file_size,
            total_budget_bytes: self.storage_budget_bytes,
            storage_key: self.storage_key.clone(),
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            storage_budget_bytes: DEFAULT_STORAGE_BUDGET,
            storage_quota_bytes: Some(DEFAULT_STORAGE_BUDGET),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_backend: BackendKind::File,
            storage_dir: PathBuf::from("./data"),
            server_port: 3000,
        }
    }
}
