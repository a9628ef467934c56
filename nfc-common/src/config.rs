//! Configuration loading and resolution
//!
//! Bootstrap configuration comes from a TOML file. Individual values follow
//! the usual priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: defaults apply. A file that was
//! named explicitly (CLI or `NFC_CONFIG`) must exist and parse.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "NFC_CONFIG";
/// Environment variable overriding the HTTP port
pub const ENV_PORT: &str = "NFC_PORT";
/// Environment variable overriding the verifier base URL
pub const ENV_VERIFIER_URL: &str = "NFC_VERIFIER_URL";

/// Default HTTP port for nfc-checker
pub const DEFAULT_PORT: u16 = 5780;
/// Default bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Default verifier service base URL (local classifier)
pub const DEFAULT_VERIFIER_URL: &str = "http://localhost:8000";
/// Default confidence threshold below which a verdict is uncertain
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 70;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// HTTP server port
    pub port: u16,

    /// HTTP bind address
    pub bind_address: String,

    /// Verifier service base URL (`/predict` and `/health` are appended)
    pub verifier_url: String,

    /// Client-side timeout for verifier calls in seconds (0 = none)
    pub verifier_timeout_secs: u64,

    /// Initial analysis settings
    pub analysis: AnalysisSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            verifier_url: DEFAULT_VERIFIER_URL.to_string(),
            verifier_timeout_secs: 0,
            analysis: AnalysisSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Per-analysis settings
///
/// Read once at the start of every analysis run. Serialized in camelCase on
/// the wire; the TOML `[analysis]` table may use snake_case keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisSettings {
    /// Verdicts with confidence below this value are flagged uncertain (0-100)
    #[serde(alias = "confidence_threshold")]
    pub confidence_threshold: u8,

    /// Evidence source families the caller wants consulted
    pub sources: BTreeSet<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            sources: ["wikipedia", "news", "factCheckers"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AnalysisSettings {
    /// Reject settings that no analysis could run with
    pub fn validate(&self) -> Result<()> {
        if self.confidence_threshold > 100 {
            return Err(Error::InvalidInput(format!(
                "confidenceThreshold must be within 0-100, got {}",
                self.confidence_threshold
            )));
        }
        if self.sources.is_empty() {
            return Err(Error::InvalidInput(
                "sources must name at least one source".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a verdict at `confidence` falls below the threshold
    pub fn is_uncertain(&self, confidence: f64) -> bool {
        confidence < f64::from(self.confidence_threshold)
    }
}

/// Locates and loads the TOML bootstrap file
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Path named explicitly by the CLI or `NFC_CONFIG`
    fn explicit_path(&self) -> Option<PathBuf> {
        self.cli_path
            .clone()
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from))
    }

    /// First existing platform config file, if any
    fn discovered_path() -> Option<PathBuf> {
        let user_config = dirs::config_dir().map(|d| d.join("nfc").join("config.toml"));
        if let Some(path) = user_config {
            if path.exists() {
                return Some(path);
            }
        }

        if cfg!(target_os = "linux") {
            let system_config = PathBuf::from("/etc/nfc/config.toml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load(&self) -> Result<TomlConfig> {
        if let Some(path) = self.explicit_path() {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return load_toml_config(&path);
        }

        match Self::discovered_path() {
            Some(path) => load_toml_config(&path),
            None => {
                warn!("No config file found, using compiled defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    config.analysis.validate().map_err(|e| {
        Error::Config(format!("Invalid [analysis] table in {}: {}", path.display(), e))
    })?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the HTTP port: CLI → `NFC_PORT` → TOML/default
pub fn resolve_port(cli_arg: Option<u16>, config: &TomlConfig) -> Result<u16> {
    if let Some(port) = cli_arg {
        return Ok(port);
    }

    if let Ok(value) = std::env::var(ENV_PORT) {
        let port = value
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("{} is not a valid port ({}): {}", ENV_PORT, value, e)))?;
        debug!(port, "Port taken from environment");
        return Ok(port);
    }

    Ok(config.port)
}

/// Resolve the verifier base URL: CLI → `NFC_VERIFIER_URL` → TOML/default
///
/// Trailing slashes are stripped so endpoint paths can be appended.
pub fn resolve_verifier_url(cli_arg: Option<&str>, config: &TomlConfig) -> String {
    let url = cli_arg
        .map(str::to_string)
        .or_else(|| std::env::var(ENV_VERIFIER_URL).ok())
        .unwrap_or_else(|| config.verifier_url.clone());

    url.trim_end_matches('/').to_string()
}
