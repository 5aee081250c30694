use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    data_aquisition::core::Row,
    parsers::ovsdb_parser::{
        cell::DecodedCell,
        record::{OvsdbRecord, RecordError, RowReader},
    },
};

/// Represents an OVS port. Holds the same data as the output of
/// `ovs-vsctl list Port`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OvsPort {
    pub uuid: String,
    pub name: String,
    pub interfaces: Vec<String>,
    pub bond_downdelay: f64,
    pub bond_fake_iface: bool,
    pub bond_updelay: f64,
    pub external_ids: BTreeMap<String, String>,
    pub fake_bridge: bool,
    pub protected: bool,
    pub bond_active_slave: Option<DecodedCell>,
    pub bond_mode: Option<DecodedCell>,
    pub cvlans: Option<DecodedCell>,
    pub lacp: Option<DecodedCell>,
    pub mac: Option<DecodedCell>,
    pub other_config: Option<DecodedCell>,
    pub qos: Option<DecodedCell>,
    pub rstp_statistics: Option<DecodedCell>,
    pub rstp_status: Option<DecodedCell>,
    pub statistics: Option<DecodedCell>,
    pub status: Option<DecodedCell>,
    pub tag: Option<DecodedCell>,
    pub trunks: Option<DecodedCell>,
    pub vlan_mode: Option<DecodedCell>,
}

impl OvsdbRecord for OvsPort {
    const TABLE: &'static str = "Port";

    fn from_row(row: &Row, columns: &[String]) -> Result<Self, RecordError> {
        let reader = RowReader::open(Self::TABLE, row, columns)?;
        Ok(Self {
            name: reader.field("name")?,
            interfaces: reader.field("interfaces")?,
            bond_downdelay: reader.field("bond_downdelay")?,
            bond_fake_iface: reader.field("bond_fake_iface")?,
            bond_updelay: reader.field("bond_updelay")?,
            external_ids: reader.field("external_ids")?,
            fake_bridge: reader.field("fake_bridge")?,
            protected: reader.field("protected")?,
            bond_active_slave: reader.raw("bond_active_slave"),
            bond_mode: reader.raw("bond_mode"),
            cvlans: reader.raw("cvlans"),
            lacp: reader.raw("lacp"),
            mac: reader.raw("mac"),
            other_config: reader.raw("other_config"),
            qos: reader.raw("qos"),
            rstp_statistics: reader.raw("rstp_statistics"),
            rstp_status: reader.raw("rstp_status"),
            statistics: reader.raw("statistics"),
            status: reader.raw("status"),
            tag: reader.raw("tag"),
            trunks: reader.raw("trunks"),
            vlan_mode: reader.raw("vlan_mode"),
            uuid: reader.into_uuid(),
        })
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }
}
