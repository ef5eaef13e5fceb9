//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PACELEDGER_DB_PATH`: Database file path (required)
//! - `PACELEDGER_DB_POOL_SIZE`: Connection pool size (optional)
//! - `PACELEDGER_BIND_ADDR`: HTTP bind address (optional)
//!
//! ## File Locations
//! The loader probes `config.{toml,json}` and `paceledger.{toml,json}` in
//! the working directory, up to two parent directories, and next to the
//! executable.

use std::path::{Path, PathBuf};

use paceledger_domain::{Config, DatabaseConfig, PaceLedgerError, Result, ServerConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `PACELEDGER_DB_PATH` is required; pool size and bind address fall back
/// to their defaults when unset.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("PACELEDGER_DB_PATH")?;
    let pool_size = match std::env::var("PACELEDGER_DB_POOL_SIZE") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| PaceLedgerError::Config(format!("Invalid pool size: {e}")))?,
        Err(_) => DatabaseConfig::default_pool_size(),
    };
    let bind_addr = std::env::var("PACELEDGER_BIND_ADDR")
        .unwrap_or_else(|_| ServerConfig::default().bind_addr);

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        server: ServerConfig { bind_addr },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by file extension.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PaceLedgerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PaceLedgerError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PaceLedgerError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PaceLedgerError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PaceLedgerError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PaceLedgerError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file, returning the
/// first that exists
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.push(dir.join("config.toml"));
            candidates.push(dir.join("config.json"));
            candidates.push(dir.join("paceledger.toml"));
            candidates.push(dir.join("paceledger.json"));
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
            candidates.push(exe_dir.join("config.json"));
            candidates.push(exe_dir.join("paceledger.toml"));
            candidates.push(exe_dir.join("paceledger.json"));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PaceLedgerError::Config(format!("Missing required environment variable: {key}"))
    })
}
