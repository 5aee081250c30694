/*
This module turns raw OVSDB query results into typed records.

--- data_aquisition module ---
Transact
|
| QueryResult: column layout + rows of raw JSON cells
v
--- ovsdb_parser::cell ---
DecodedCell, tagged with its observed shape
|
| FromCell normalization (scalar <-> one-element set)
v
--- ovsdb_parser::{bridge, port} ---
OvsBridge / OvsPort
|
v
--- topology module ---
Port -> interfaces and interface -> bridge mappings
*/
pub mod bridge;
pub mod cell;
pub mod port;
pub mod record;

pub use bridge::OvsBridge;
pub use cell::{CellShape, DecodeError, DecodedCell, FromCell};
pub use port::OvsPort;
pub use record::{OvsdbRecord, RecordError};
