/*!
Topology module

This module materializes OVSDB tables into typed records and derives the
Bridge -> Port -> Interface ownership mapping from them.

Structure:
- `ovsdb`: `OvsClient`, generic over any `Transact` collaborator, plus the pure
           join helpers (`port_interfaces`, `interface_bridges`).
- `error`: `OvsdbError`, the error type returned by every client operation.

Re-exports:
- `OvsClient`, `OvsdbError` and `OvsdbResult` for easy consumption by callers.
*/

pub mod error;
pub mod ovsdb;

pub use error::{OvsdbError, OvsdbResult, TopologyStage};
pub use ovsdb::{InterfaceBridges, OvsClient, PortInterfaces};
