/*!
Typed records materialized from OVSDB table rows.

This module defines:
- `OvsdbRecord`: a record kind bound to one table, built from a single result row.
- `RecordError`: why a row could not become a record.
- `RowReader`: per-row field access implementing the decode policy shared by all record kinds.

Decode policy:
- `_uuid` is mandatory. Missing, misshapen or empty fails the row.
- Typed fields left at their zero value when the column is absent; a present column
  of the wrong shape fails the row.
- Unverified fields (`raw`) carry whatever decoded, and are `None` when absent or undecodable.
*/

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    data_aquisition::core::Row,
    parsers::ovsdb_parser::cell::{DecodeError, DecodedCell, FromCell},
};

pub const UUID_COLUMN: &str = "_uuid";

/// A record kind backed by one OVSDB table.
pub trait OvsdbRecord: Sized + Send {
    /// Table the record is read from, e.g. `Bridge`.
    const TABLE: &'static str;

    fn from_row(row: &Row, columns: &[String]) -> Result<Self, RecordError>;

    fn uuid(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("couldn't get {table} '_uuid': {source}")]
    MissingIdentifier {
        table: &'static str,
        source: DecodeError,
    },
    #[error("{table} '_uuid' is empty")]
    EmptyIdentifier { table: &'static str },
    #[error("'{column}' of {table} {uuid} is invalid: {source}")]
    Field {
        table: &'static str,
        uuid: String,
        column: &'static str,
        source: DecodeError,
    },
}

/// Field access for a single row whose identifier has already been decoded.
pub struct RowReader<'a> {
    table: &'static str,
    row: &'a Row,
    columns: &'a [String],
    uuid: String,
}

impl<'a> RowReader<'a> {
    /// Decodes the identifier column; every other field is read through the returned reader.
    pub fn open(table: &'static str, row: &'a Row, columns: &'a [String]) -> Result<Self, RecordError> {
        let uuid: String = row
            .get(UUID_COLUMN, columns)
            .map_err(|source| RecordError::MissingIdentifier { table, source })?;
        if uuid.is_empty() {
            return Err(RecordError::EmptyIdentifier { table });
        }
        Ok(Self {
            table,
            row,
            columns,
            uuid,
        })
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn into_uuid(self) -> String {
        self.uuid
    }

    /// Typed field. Absent column yields `T::default()`.
    pub fn field<T: FromCell + Default>(&self, column: &'static str) -> Result<T, RecordError> {
        match self.row.get_optional::<T>(column, self.columns) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                trace!(table = self.table, uuid = %self.uuid, column, "column absent");
                Ok(T::default())
            }
            Err(source) => Err(RecordError::Field {
                table: self.table,
                uuid: self.uuid.clone(),
                column,
                source,
            }),
        }
    }

    /// Unverified field with no shape contract.
    pub fn raw(&self, column: &'static str) -> Option<DecodedCell> {
        match self.row.column_value(column, self.columns) {
            Ok(cell) => Some(cell),
            Err(e) => {
                if !e.is_column_not_found() {
                    debug!(table = self.table, uuid = %self.uuid, column, error = %e, "ignoring undecodable column");
                }
                None
            }
        }
    }
}
