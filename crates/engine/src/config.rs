//! Store configuration via `ledgerstore.toml`
//!
//! One file declares everything the executor needs at startup: the record
//! kinds and their indexes, the access gate, the table of operation names
//! callers may invoke, and the records `seed` writes. The configuration is
//! loaded once and validated eagerly; a process never runs with a
//! half-valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerstore_core::{
    make_composite_key, validate_key_with_limits, Fields, Limits, RecordKind,
};

use crate::gate::AccessGate;
use crate::registry::KindRegistry;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ledgerstore.toml";

/// Configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file could not be written
    #[error("failed to write config file '{}': {source}", .path.display())]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The TOML could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// The config parsed but is not coherent
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One callable operation
///
/// `op` selects the store operation; the other fields bind the parameters
/// that operation needs. Which fields are required depends on `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Function name callers invoke
    pub name: String,
    /// Store operation, e.g. `"read"` or `"query_by_index"`
    pub op: String,
    /// Record kind for `create`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Index name for `query_by_index`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Field name for `update_field`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Fixed lower bound for `query_range`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Fixed upper bound for `query_range`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl RouteConfig {
    /// Route with only a name and an operation
    pub fn new(name: impl Into<String>, op: impl Into<String>) -> Self {
        RouteConfig {
            name: name.into(),
            op: op.into(),
            kind: None,
            index: None,
            field: None,
            start: None,
            end: None,
        }
    }

    /// Bind a record kind
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Bind an index name
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Bind a field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Bind fixed range bounds
    pub fn with_bounds(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }
}

/// A record written by the `seed` operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Record kind
    pub kind: String,
    /// Primary key
    pub key: String,
    /// Field values
    pub fields: Fields,
}

/// Store configuration loaded from `ledgerstore.toml`.
///
/// # Example
///
/// ```toml
/// max_key_bytes = 1024
///
/// [gate]
/// attribute = "role"
/// required = "approver"
///
/// [[kinds]]
/// name = "car"
/// fields = ["make", "model", "color", "owner"]
/// indexes = ["owner"]
///
/// [[routes]]
/// name = "queryCar"
/// op = "read"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum primary key length in bytes
    #[serde(default = "default_max_key_bytes")]
    pub max_key_bytes: usize,
    /// Access gate for `guarded_read` routes
    #[serde(default)]
    pub gate: AccessGate,
    /// Record kinds
    #[serde(default)]
    pub kinds: Vec<RecordKind>,
    /// Callable operations
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
    /// Records written by `seed`
    #[serde(default)]
    pub seed: Vec<SeedRecord>,
}

fn default_max_key_bytes() -> usize {
    Limits::default().max_key_bytes
}

const DEFAULT_CARS: [(&str, &str, &str, &str); 10] = [
    ("Toyota", "Prius", "blue", "Tomoko"),
    ("Ford", "Mustang", "red", "Brad"),
    ("Hyundai", "Tucson", "green", "Jin Soo"),
    ("Volkswagen", "Passat", "yellow", "Max"),
    ("Tesla", "S", "black", "Adriana"),
    ("Peugeot", "205", "purple", "Michel"),
    ("Chery", "S22L", "white", "Aarav"),
    ("Fiat", "Punto", "violet", "Pari"),
    ("Tata", "Nano", "indigo", "Valeria"),
    ("Holden", "Barina", "brown", "Shotaro"),
];

impl Default for StoreConfig {
    fn default() -> Self {
        let car = RecordKind::new("car", ["make", "model", "color", "owner"]).with_index("owner");
        let routes = vec![
            RouteConfig::new("queryCar", "read"),
            RouteConfig::new("test", "read"),
            RouteConfig::new("initLedger", "seed"),
            RouteConfig::new("createCar", "create").with_kind("car"),
            RouteConfig::new("queryAllCars", "query_range").with_bounds("CAR0", "CAR999"),
            RouteConfig::new("changeCarOwner", "update_field").with_field("owner"),
            RouteConfig::new("getHistoryForAsset", "history"),
            RouteConfig::new("queryCarsByOwner", "query_by_index").with_index("owner~key"),
            RouteConfig::new("restictedMethod", "guarded_read"),
        ];
        let seed = DEFAULT_CARS
            .iter()
            .enumerate()
            .map(|(i, (make, model, color, owner))| SeedRecord {
                kind: "car".to_string(),
                key: format!("CAR{}", i),
                fields: ledgerstore_core::fields([
                    ("make", *make),
                    ("model", *model),
                    ("color", *color),
                    ("owner", *owner),
                ]),
            })
            .collect();
        StoreConfig {
            max_key_bytes: default_max_key_bytes(),
            gate: AccessGate::default(),
            kinds: vec![car],
            routes,
            seed,
        }
    }
}

impl StoreConfig {
    /// Key limits derived from this config
    pub fn limits(&self) -> Limits {
        Limits {
            max_key_bytes: self.max_key_bytes,
        }
    }

    /// Build the kind registry declared by this config
    pub fn registry(&self) -> Result<KindRegistry, ConfigError> {
        KindRegistry::from_kinds(self.kinds.iter().cloned(), self.limits())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Check the config is coherent
    ///
    /// Kinds must be valid and uniquely named, the gate must name an
    /// attribute, and every seed record must fit its kind, have a valid key
    /// and carry encodable indexed values. Routes are
    /// checked when the executor builds its dispatch table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_key_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_key_bytes must be greater than zero".to_string(),
            ));
        }
        if self.gate.attribute.is_empty() {
            return Err(ConfigError::Invalid(
                "gate attribute cannot be empty".to_string(),
            ));
        }
        let registry = self.registry()?;
        for record in &self.seed {
            let kind = registry
                .get(&record.kind)
                .map_err(|e| ConfigError::Invalid(format!("seed '{}': {}", record.key, e)))?;
            kind.check_fields(&record.fields)
                .map_err(|e| ConfigError::Invalid(format!("seed '{}': {}", record.key, e)))?;
            validate_key_with_limits(&record.key, &self.limits())
                .map_err(|e| ConfigError::Invalid(format!("seed '{}': {}", record.key, e)))?;
            for (field, index) in kind.index_names() {
                let value = record.fields.get(field).map_or("", String::as_str);
                make_composite_key(&index, &[value, record.key.as_str()]).map_err(|e| {
                    ConfigError::Invalid(format!("seed '{}' field '{}': {}", record.key, field, e))
                })?;
            }
        }
        Ok(())
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# ledgerstore configuration

# Longest primary key accepted, in bytes
max_key_bytes = 1024

# Guarded operations require this caller attribute value
[gate]
attribute = "role"
required = "approver"

# Record kinds. Each indexed field gets an index named "<field>~key".
[[kinds]]
name = "car"
fields = ["make", "model", "color", "owner"]
indexes = ["owner"]

# Callable operations.
#   read            args: key
#   guarded_read    args: key (caller must pass the gate)
#   create          args: key, then one value per field of `kind`
#   update_field    args: key, new value for `field`
#   query_range     args: start, end (or none when start/end are fixed here)
#   query_by_index  args: indexed value, looked up in `index`
#   history         args: key
#   seed            args: none
[[routes]]
name = "queryCar"
op = "read"

[[routes]]
name = "test"
op = "read"

[[routes]]
name = "initLedger"
op = "seed"

[[routes]]
name = "createCar"
op = "create"
kind = "car"

[[routes]]
name = "queryAllCars"
op = "query_range"
start = "CAR0"
end = "CAR999"

[[routes]]
name = "changeCarOwner"
op = "update_field"
field = "owner"

[[routes]]
name = "getHistoryForAsset"
op = "history"

[[routes]]
name = "queryCarsByOwner"
op = "query_by_index"
index = "owner~key"

[[routes]]
name = "restictedMethod"
op = "guarded_read"

# Records written by the seed operation
[[seed]]
kind = "car"
key = "CAR0"
fields = { make = "Toyota", model = "Prius", color = "blue", owner = "Tomoko" }

[[seed]]
kind = "car"
key = "CAR1"
fields = { make = "Ford", model = "Mustang", color = "red", owner = "Brad" }

[[seed]]
kind = "car"
key = "CAR2"
fields = { make = "Hyundai", model = "Tucson", color = "green", owner = "Jin Soo" }

[[seed]]
kind = "car"
key = "CAR3"
fields = { make = "Volkswagen", model = "Passat", color = "yellow", owner = "Max" }

[[seed]]
kind = "car"
key = "CAR4"
fields = { make = "Tesla", model = "S", color = "black", owner = "Adriana" }

[[seed]]
kind = "car"
key = "CAR5"
fields = { make = "Peugeot", model = "205", color = "purple", owner = "Michel" }

[[seed]]
kind = "car"
key = "CAR6"
fields = { make = "Chery", model = "S22L", color = "white", owner = "Aarav" }

[[seed]]
kind = "car"
key = "CAR7"
fields = { make = "Fiat", model = "Punto", color = "violet", owner = "Pari" }

[[seed]]
kind = "car"
key = "CAR8"
fields = { make = "Tata", model = "Nano", color = "indigo", owner = "Valeria" }

[[seed]]
kind = "car"
key = "CAR9"
fields = { make = "Holden", model = "Barina", color = "brown", owner = "Shotaro" }
"#
    }
}
