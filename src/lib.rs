/*!
Typed access to the Open vSwitch database (OVSDB).

Raw query results are decoded cell by cell (`parsers::ovsdb_parser::cell`), rows become
`OvsBridge` / `OvsPort` records, and `OvsClient::resolve_interface_ownership` joins
them into an interface -> bridge name mapping.
*/

pub mod config;
pub mod data_aquisition;
pub mod logging;
pub mod parsers;
pub mod topology;

pub use config::ClientConfig;
pub use data_aquisition::{
    core::{QueryResult, Row, Transact},
    dump::{StaticTransport, StaticTransportError},
};
pub use parsers::ovsdb_parser::{
    CellShape, DecodeError, DecodedCell, FromCell, OvsBridge, OvsPort, OvsdbRecord, RecordError,
};
pub use topology::{InterfaceBridges, OvsClient, OvsdbError, OvsdbResult, PortInterfaces, TopologyStage};
