//! Configuration persistence layer
//!
//! Serializes bridge configurations to JSON and reads them back. Unknown
//! format versions are rejected.

use crate::{BridgeConfig, ConfigError, ConfigResult};
use tracing::warn;

/// Serializes a configuration to pretty-printed JSON bytes
pub fn serialize_config(config: &BridgeConfig) -> ConfigResult<Vec<u8>> {
    serde_json::to_vec_pretty(config).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
}

/// Deserializes a configuration from JSON bytes
pub fn deserialize_config(bytes: &[u8]) -> ConfigResult<BridgeConfig> {
    let config: BridgeConfig = serde_json::from_slice(bytes)
        .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;

    // Check version compatibility
    if config.version != BridgeConfig::CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion(config.version));
    }

    Ok(config)
}

/// Attempts to load a configuration from bytes, falling back to defaults on error
pub fn load_config_safe(bytes: &[u8]) -> BridgeConfig {
    deserialize_config(bytes).unwrap_or_else(|e| {
        warn!(error = %e, "Using default configuration");
        BridgeConfig::default()
    })
}
