use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE: &str = "Open_vSwitch";
pub const DATABASE_ENVVAR: &str = "OVSDB_DATABASE";

/// Settings for an `OvsClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Database every query is issued against.
    pub database: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE)
    }
}

impl ClientConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }

    /// Default config, with the database overridden by `OVSDB_DATABASE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DATABASE_ENVVAR) {
            Some(database) if !database.trim().is_empty() => Self::new(database.trim()),
            _ => Self::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
