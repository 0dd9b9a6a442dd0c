//! # Bridge Settings
//!
//! Configuration for hosts that expose capability trees to the asset layer.
//!
//! ## Philosophy
//!
//! - **Tokens, not paths**: the game path is a root capability token
//! - **Explicit grants**: a host directory is only reachable if the
//!   configuration grants it under a token
//! - **Deterministic**: grants are kept in a BTreeMap so the serialized
//!   form is stable
//! - **Versioned**: unknown format versions are rejected, never guessed at
//!
//! ## Example
//!
//! ```
//! use services_settings::BridgeConfig;
//!
//! let config = BridgeConfig::load_from_slice(
//!     br#"{ "version": 1, "game_path": "games", "grants": { "games": "/srv/bw" } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.root_capability().unwrap().token(), "games");
//! ```

pub mod persistence;

use core_types::RootCapability;
use serde::{Deserialize, Serialize};
use services_fs_view::ReadStrategy;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub use persistence::{deserialize_config, load_config_safe, serialize_config};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or checking a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to serialize configuration: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize configuration: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported configuration version: {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Game path {0:?} is not one of the granted tokens")]
    UngrantedGamePath(String),
}

/// Host configuration for the asset bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Version of the configuration format
    pub version: u32,
    /// Token of the root capability assets are loaded from
    #[serde(default)]
    pub game_path: Option<String>,
    /// Host directories granted under opaque tokens
    #[serde(default)]
    pub grants: BTreeMap<String, PathBuf>,
    /// How whole-file reads drain their stream
    #[serde(default)]
    pub read_strategy: ReadStrategy,
    /// Log filter directive, overridable through `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl BridgeConfig {
    /// Current version of the configuration format
    pub const CURRENT_VERSION: u32 = 1;

    /// Loads a configuration from JSON bytes
    pub fn load_from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        deserialize_config(bytes)
    }

    /// Loads a configuration from a JSON file
    pub fn load_from_file(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let bytes = std::fs::read(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = ?path, "Loaded configuration file");
        Self::load_from_slice(&bytes)
    }

    pub fn to_json_bytes(&self) -> ConfigResult<Vec<u8>> {
        serialize_config(self)
    }

    /// Checks that the game path refers to a granted token
    ///
    /// A configuration without grants is accepted as is: the capability
    /// store is then supplied by the embedder.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        match &self.game_path {
            Some(token) if !self.grants.is_empty() && !self.grants.contains_key(token) => {
                Err(ConfigError::UngrantedGamePath(token.clone()))
            }
            _ => Ok(()),
        }
    }

    /// The game path as a root capability
    pub fn root_capability(&self) -> Option<RootCapability> {
        self.game_path.as_deref().map(RootCapability::from_token)
    }

    /// Grants `dir` under `token`
    pub fn grant(&mut self, token: impl Into<String>, dir: impl Into<PathBuf>) {
        self.grants.insert(token.into(), dir.into());
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            game_path: None,
            grants: BTreeMap::new(),
            read_strategy: ReadStrategy::default(),
            log_filter: default_log_filter(),
        }
    }
}
