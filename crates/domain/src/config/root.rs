use std::path::Path;

use serde::{Deserialize, Serialize};

use super::dht::DhtConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::namecache::NamecacheConfig;
use super::revocation::RevocationConfig;
use super::root_zones::RootZonesConfig;

/// Top-level resolver configuration, loaded from a TOML file and
/// optionally patched by CLI overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GnsConfig {
    #[serde(default)]
    pub root_zones: RootZonesConfig,

    #[serde(default)]
    pub namecache: NamecacheConfig,

    #[serde(default)]
    pub dht: DhtConfig,

    #[serde(default)]
    pub revocation: RevocationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CLI-supplied overrides, applied on top of the file-loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub namecache_endpoint: Option<String>,
    pub dht_endpoint: Option<String>,
    pub log_level: Option<String>,
}

impl GnsConfig {
    pub fn load(path: &Path, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: GnsConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(endpoint) = overrides.namecache_endpoint {
            self.namecache.endpoint = endpoint;
        }
        if let Some(endpoint) = overrides.dht_endpoint {
            self.dht.endpoint = endpoint;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dht.replication_level == 0 {
            return Err(ConfigError::Invalid(
                "dht.replication_level must be greater than zero".into(),
            ));
        }
        for (label, ztld) in &self.root_zones.zones {
            if label.is_empty() {
                return Err(ConfigError::Invalid("root zone label must not be empty".into()));
            }
            if ztld.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "root zone '{label}' has an empty zTLD value"
                )));
            }
        }
        Ok(())
    }
}
