//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//! Environment variables always win over file values.
//!
//! ## Loading Strategy
//! 1. Start from a config file if one is found (or defaults otherwise)
//! 2. Overlay any `INFORMADO_*` environment variables
//! 3. Validate the result
//!
//! ## Environment Variables
//! - `INFORMADO_API_BASE_URL`: Backend base URL
//! - `INFORMADO_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `INFORMADO_STORAGE_BACKEND`: `memory`, `file` or `keychain`
//! - `INFORMADO_STORAGE_PATH`: Session file path (file backend)
//! - `INFORMADO_DEV_FALLBACK`: Enable the local development login (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./informado.json` or `./informado.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use informado_domain::{ClientConfig, InformadoError, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["informado.json", "informado.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Reads the first config file found by [`probe_config_paths`] (or starts
/// from defaults when there is none), then applies environment overrides.
///
/// # Errors
/// Returns `InformadoError::Config` if:
/// - A config file exists but cannot be read or parsed
/// - An environment variable has an invalid value
/// - The resulting configuration fails validation
pub fn load() -> Result<ClientConfig> {
    load_with(None)
}

/// Load configuration from an explicit file (or the probed one), then
/// overlay environment variables
///
/// Environment variables win over values from the file.
///
/// # Errors
/// Returns `InformadoError::Config` if:
/// - `path` is given and the file does not exist
/// - The file cannot be read or parsed
/// - An environment variable has an invalid value
/// - The resulting configuration fails validation
pub fn load_with(path: Option<PathBuf>) -> Result<ClientConfig> {
    let base = match path.or_else(probe_config_paths) {
        Some(path) => read_config_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            ClientConfig::default()
        }
    };

    let config = apply_env(base)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables over the defaults
///
/// Unset variables keep their default values.
///
/// # Errors
/// Returns `InformadoError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let config = apply_env(ClientConfig::default())?;
    config.validate()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Missing fields take their defaults. Environment variables are not
/// consulted; use [`load_with`] for the layered configuration.
///
/// # Errors
/// Returns `InformadoError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The values fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            InformadoError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    let config = read_config_file(&config_path)?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a config file without validating it
fn read_config_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        return Err(InformadoError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| InformadoError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| InformadoError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| InformadoError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(InformadoError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// directory of the running executable for `informado.{json,toml}` and
/// `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn apply_env(mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(url) = env_opt("INFORMADO_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(raw) = env_opt("INFORMADO_API_TIMEOUT_SECS") {
        config.api.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| InformadoError::Config(format!("Invalid API timeout: {e}")))?;
    }
    if let Some(raw) = env_opt("INFORMADO_STORAGE_BACKEND") {
        config.storage.backend = raw.parse()?;
    }
    if let Some(path) = env_opt("INFORMADO_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    }
    config.dev_fallback = env_bool("INFORMADO_DEV_FALLBACK", config.dev_fallback);
    Ok(config)
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
