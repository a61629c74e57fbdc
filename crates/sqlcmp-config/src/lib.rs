//! Configuration records for sqlcmp.
//!
//! Engine switches are read from TOML; every table and field is optional and
//! falls back to the defaults below.

mod realm;


use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs, path::Path};
use thiserror::Error as ThisError;

// re-exports
pub use realm::{PropertyConfig, RealmConfig};

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("realm '{name}' is declared more than once")]
    DuplicateRealm { name: String },
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub predicate: PredicateConfig,
    pub index: IndexConfig,
    #[serde(rename = "realm")]
    pub realms: Vec<RealmConfig>,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Look up one realm by name (case-insensitive, as realm names are).
    #[must_use]
    pub fn realm(&self, name: &str) -> Option<&RealmConfig> {
        self.realms
            .iter()
            .find(|realm| realm.name.eq_ignore_ascii_case(name))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for realm in &self.realms {
            if !seen.insert(realm.name.to_ascii_uppercase()) {
                return Err(ConfigError::DuplicateRealm {
                    name: realm.name.clone(),
                });
            }
        }

        Ok(())
    }
}

///
/// PredicateConfig
///
/// Switches consumed by the comparison optimizer.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredicateConfig {
    /// Emit a warning when a comparison against a NULL literal is optimized away.
    pub warn_on_null_constant: bool,
}

///
/// IndexConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// When false, predicates never contribute index conditions.
    pub derive_conditions: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            derive_conditions: true,
        }
    }
}
