use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::core::{QueryResult, Transact};

/// Serves previously captured query results, keyed by table name.
///
/// A dump is a JSON object mapping table names to `{"columns": [..], "rows": [[..], ..]}`.
/// Only `SELECT * FROM <Table>` queries are understood.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticTransport {
    tables: HashMap<String, QueryResult>,
}

#[derive(Debug, Error)]
pub enum StaticTransportError {
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),
    #[error("No captured result for table {0}")]
    UnknownTable(String),
    #[error("Failed to parse dump: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, result: QueryResult) -> Self {
        self.tables.insert(table.to_string(), result);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, StaticTransportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, StaticTransportError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    fn table_of(query: &str) -> Option<&str> {
        query
            .trim()
            .strip_prefix("SELECT * FROM ")
            .map(str::trim)
            .filter(|table| !table.is_empty() && !table.contains(char::is_whitespace))
    }
}

#[async_trait]
impl Transact for StaticTransport {
    type Error = StaticTransportError;

    async fn transact(&self, database: &str, query: &str) -> Result<QueryResult, Self::Error> {
        let table = Self::table_of(query)
            .ok_or_else(|| StaticTransportError::UnsupportedQuery(query.to_string()))?;
        debug!(database, table, "serving captured result");
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| StaticTransportError::UnknownTable(table.to_string()))
    }
}
