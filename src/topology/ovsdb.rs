/*!
Bridge/Port materialization and interface ownership resolution.

`OvsClient::resolve_interface_ownership` joins Bridge -> Port -> Interface with two
independent `SELECT * FROM <Table>` queries. The two snapshots share no transaction, so
the mapping is only as consistent as the database's mutation rate between them allows.
Bridges referencing ports the Port snapshot doesn't contain are skipped. If strict
consistency is ever needed it has to come from a single combined query or an explicit
read transaction at the collaborator, not from this layer.
*/

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    data_aquisition::core::Transact,
    parsers::ovsdb_parser::{OvsBridge, OvsPort, OvsdbRecord},
    topology::error::{OvsdbError, OvsdbResult, TopologyStage},
};

/// Port UUID -> interface UUIDs of that port.
pub type PortInterfaces = HashMap<String, Vec<String>>;

/// Interface UUID -> name of the bridge owning it.
pub type InterfaceBridges = HashMap<String, String>;

/// Typed read access to the Open vSwitch database through a `Transact` collaborator.
///
/// Holds no state besides its configuration; every call re-queries.
pub struct OvsClient<T: Transact> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transact> OvsClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn query_for(table: &str) -> String {
        format!("SELECT * FROM {table}")
    }

    /// Reads every row of `R::TABLE`, in the order the query returned them.
    /// Fails as a whole on the first row that can't be decoded.
    pub async fn list_all<R: OvsdbRecord>(&self) -> OvsdbResult<Vec<R>> {
        let query = Self::query_for(R::TABLE);
        debug!(database = %self.config.database, %query, "issuing query");

        let result = self
            .transport
            .transact(&self.config.database, &query)
            .await
            .map_err(|e| OvsdbError::QueryExecution {
                query: query.clone(),
                source: Box::new(e),
            })?;

        if result.rows.is_empty() {
            return Err(OvsdbError::EmptyResult { query });
        }

        let records = result
            .rows
            .iter()
            .map(|row| R::from_row(row, &result.columns))
            .collect::<Result<Vec<R>, _>>()
            .map_err(|source| OvsdbError::Record {
                query: query.clone(),
                source,
            })?;

        debug!(table = R::TABLE, count = records.len(), "materialized records");
        Ok(records)
    }

    pub async fn bridges(&self) -> OvsdbResult<Vec<OvsBridge>> {
        self.list_all().await
    }

    pub async fn ports(&self) -> OvsdbResult<Vec<OvsPort>> {
        self.list_all().await
    }

    pub async fn ports_to_interfaces(&self) -> OvsdbResult<PortInterfaces> {
        let ports = self.ports().await?;
        Ok(port_interfaces(ports))
    }

    /// Maps every interface reachable from a bridge's ports to that bridge's name.
    pub async fn resolve_interface_ownership(&self) -> OvsdbResult<InterfaceBridges> {
        let bridges = self
            .bridges()
            .await
            .map_err(|e| e.in_stage(TopologyStage::Bridges))?;
        let ports = self
            .ports()
            .await
            .map_err(|e| e.in_stage(TopologyStage::Ports))?;
        Ok(interface_bridges(&bridges, &port_interfaces(ports)))
    }
}

/// One entry per distinct port UUID; a repeated UUID keeps the later row.
pub fn port_interfaces(ports: impl IntoIterator<Item = OvsPort>) -> PortInterfaces {
    ports
        .into_iter()
        .map(|port| (port.uuid, port.interfaces))
        .collect()
}

/// Walks bridges in order. An interface reachable from several bridges ends up
/// owned by the last one.
pub fn interface_bridges(bridges: &[OvsBridge], ports: &PortInterfaces) -> InterfaceBridges {
    let mut owners = InterfaceBridges::new();
    for bridge in bridges {
        for port in &bridge.ports {
            let Some(interfaces) = ports.get(port) else {
                warn!(bridge = %bridge.name, %port, "port missing from the Port snapshot, skipping");
                continue;
            };
            for interface in interfaces {
                owners.insert(interface.clone(), bridge.name.clone());
            }
        }
    }
    owners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge(uuid: &str, name: &str, ports: &[&str]) -> OvsBridge {
        OvsBridge {
            uuid: uuid.to_string(),
            name: name.to_string(),
            ports: ports.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    fn port(uuid: &str, interfaces: &[&str]) -> OvsPort {
        OvsPort {
            uuid: uuid.to_string(),
            name: uuid.to_string(),
            interfaces: interfaces.iter().map(|i| i.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_bridges() {
        let bridges = [bridge("b1", "B1", &["P1"]), bridge("b2", "B2", &["P2"])];
        let ports = port_interfaces([port("P1", &["I1", "I2"]), port("P2", &["I3"])]);

        let owners = interface_bridges(&bridges, &ports);
        let expected: InterfaceBridges = [("I1", "B1"), ("I2", "B1"), ("I3", "B2")]
            .iter()
            .map(|(i, b)| (i.to_string(), b.to_string()))
            .collect();
        assert_eq!(owners, expected);
    }

    #[test]
    fn test_dangling_port_is_skipped() {
        let bridges = [bridge("b1", "B1", &["P1", "P9"])];
        let ports = port_interfaces([port("P1", &["I1"])]);

        let owners = interface_bridges(&bridges, &ports);
        assert_eq!(owners.len(), 1);
        assert_eq!(owners.get("I1").map(String::as_str), Some("B1"));
    }

    #[test]
    fn test_last_bridge_wins() {
        let ports = port_interfaces([port("P1", &["I1"]), port("P2", &["I1"])]);

        let bridges = [bridge("b1", "B1", &["P1"]), bridge("b2", "B2", &["P2"])];
        assert_eq!(interface_bridges(&bridges, &ports).get("I1").map(String::as_str), Some("B2"));

        let bridges = [bridge("b2", "B2", &["P2"]), bridge("b1", "B1", &["P1"])];
        assert_eq!(interface_bridges(&bridges, &ports).get("I1").map(String::as_str), Some("B1"));
    }

    #[test]
    fn test_port_without_interfaces() {
        let bridges = [bridge("b1", "B1", &["P1"])];
        let ports = port_interfaces([port("P1", &[])]);
        assert!(interface_bridges(&bridges, &ports).is_empty());
        assert_eq!(ports.get("P1"), Some(&Vec::new()));
    }

    #[test]
    fn test_query_text() {
        assert_eq!(
            OvsClient::<crate::data_aquisition::dump::StaticTransport>::query_for("Bridge"),
            "SELECT * FROM Bridge"
        );
    }
}
