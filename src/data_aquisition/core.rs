use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::ovsdb_parser::cell::{DecodeError, DecodedCell, FromCell};

/// Tabular result of a query: the column layout once, then positional rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }
}

/// A single result row. Cells are raw JSON values in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    /// Raw cell of a named column. A column missing from the schema and a
    /// schema column the row has no cell for are both reported as not found.
    pub fn raw_cell(&self, name: &str, columns: &[String]) -> Result<&Value, DecodeError> {
        columns
            .iter()
            .position(|column| column == name)
            .and_then(|index| self.cells.get(index))
            .ok_or_else(|| DecodeError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Decodes a named column; the observed shape is available via `DecodedCell::shape`.
    pub fn column_value(&self, name: &str, columns: &[String]) -> Result<DecodedCell, DecodeError> {
        let raw = self.raw_cell(name, columns)?;
        DecodedCell::from_raw(raw).ok_or_else(|| DecodeError::UnsupportedShape {
            column: name.to_string(),
            raw: raw.to_string(),
        })
    }

    /// Decodes a named column and normalizes it into `T`.
    pub fn get<T: FromCell>(&self, name: &str, columns: &[String]) -> Result<T, DecodeError> {
        let cell = self.column_value(name, columns)?;
        let observed = cell.shape();
        T::from_cell(cell).ok_or_else(|| DecodeError::ShapeMismatch {
            column: name.to_string(),
            expected: T::EXPECTED,
            observed,
        })
    }

    /// Like `get`, but an absent column yields `Ok(None)`. Present columns of the
    /// wrong shape are still errors.
    pub fn get_optional<T: FromCell>(
        &self,
        name: &str,
        columns: &[String],
    ) -> Result<Option<T>, DecodeError> {
        match self.get(name, columns) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_column_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Executes query text against a named OVSDB database.
/// Connection handling, framing, timeouts and retries belong to the implementor.
#[async_trait]
pub trait Transact: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn transact(&self, database: &str, query: &str) -> Result<QueryResult, Self::Error>;
}
