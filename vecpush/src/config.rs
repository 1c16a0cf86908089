//! Configuration for the vecpush client.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vecpush_core::{ConnectionInfo, DEFAULT_SAMPLE_COUNT, DEFAULT_TAG, MAX_SAMPLES, VecpushError};

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where to send.
    pub network: NetworkConfig,
    /// What to send.
    pub payload: PayloadConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Receiver host name or IP address.
    pub host: String,
    /// Receiver TCP port.
    pub port: u16,
    /// Connect deadline in milliseconds. 0 leaves it to the OS.
    pub connect_timeout_ms: u64,
}

/// Payload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Leading tag byte.
    pub tag: u8,
    /// Number of `f32` samples after the tag.
    pub count: usize,
    /// RNG seed. 0 draws from OS entropy.
    pub seed: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3000,
            connect_timeout_ms: 0,
        }
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG,
            count: DEFAULT_SAMPLE_COUNT,
            seed: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file.
    File,
    /// No readable file; defaults used.
    Missing,
    /// The file did not parse; defaults used. Holds the parse error.
    Invalid(String),
}

impl ConfigSource {
    /// Report how the configuration was obtained. Call once logging is up.
    pub fn log(&self, path: &Path) {
        match self {
            ConfigSource::File => tracing::info!("loaded config from {}", path.display()),
            ConfigSource::Missing => {
                tracing::info!("no config at {}; using defaults", path.display())
            }
            ConfigSource::Invalid(e) => {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display())
            }
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// Runs before tracing is initialised, so nothing is logged here; the
    /// returned [`ConfigSource`] carries what happened.
    pub fn load(path: &Path) -> (Self, ConfigSource) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => (cfg, ConfigSource::File),
                Err(e) => (Self::default(), ConfigSource::Invalid(e.to_string())),
            },
            Err(_) => (Self::default(), ConfigSource::Missing),
        }
    }

    /// Reject values the sender cannot honour.
    pub fn validate(&self) -> Result<(), VecpushError> {
        if self.network.host.trim().is_empty() {
            return Err(VecpushError::Config("network.host is empty".into()));
        }
        if self.network.port == 0 {
            return Err(VecpushError::Config("network.port must be non-zero".into()));
        }
        if self.payload.count > MAX_SAMPLES {
            return Err(VecpushError::Config(format!(
                "payload.count {} exceeds {MAX_SAMPLES}",
                self.payload.count
            )));
        }
        Ok(())
    }

    /// Destination for [`vecpush_core::send`].
    pub fn connection_info(&self) -> ConnectionInfo {
        let info = ConnectionInfo::new(self.network.host.clone(), self.network.port);
        match self.network.connect_timeout_ms {
            0 => info,
            ms => info.with_connect_timeout(Duration::from_millis(ms)),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
