use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    data_aquisition::core::Row,
    parsers::ovsdb_parser::{
        cell::DecodedCell,
        record::{OvsdbRecord, RecordError, RowReader},
    },
};

/// Represents an OVS bridge. Holds the same data as the output of
/// `ovs-vsctl list Bridge`.
///
/// Only `uuid`, `name` and `ports` take part in topology resolution. Fields typed as
/// `Option<DecodedCell>` are carried as decoded, their column types are not pinned down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OvsBridge {
    pub uuid: String,
    pub name: String,
    pub ports: Vec<String>,
    pub datapath_id: Option<String>,
    pub datapath_type: String,
    pub datapath_version: String,
    pub external_ids: BTreeMap<String, String>,
    pub fail_mode: Option<String>,
    pub mcast_snooping_enable: bool,
    pub other_config: BTreeMap<String, String>,
    pub rstp_enable: bool,
    pub stp_enable: bool,
    pub auto_attach: Option<DecodedCell>,
    pub controller: Option<DecodedCell>,
    pub flood_vlans: Option<DecodedCell>,
    pub flow_tables: Option<DecodedCell>,
    pub ipfix: Option<DecodedCell>,
    pub mirrors: Option<DecodedCell>,
    pub netflow: Option<DecodedCell>,
    pub protocols: Option<DecodedCell>,
    pub rstp_status: Option<DecodedCell>,
    pub sflow: Option<DecodedCell>,
    pub status: Option<DecodedCell>,
}

impl OvsdbRecord for OvsBridge {
    const TABLE: &'static str = "Bridge";

    fn from_row(row: &Row, columns: &[String]) -> Result<Self, RecordError> {
        let reader = RowReader::open(Self::TABLE, row, columns)?;
        Ok(Self {
            name: reader.field("name")?,
            ports: reader.field("ports")?,
            datapath_id: reader.field("datapath_id")?,
            datapath_type: reader.field("datapath_type")?,
            datapath_version: reader.field("datapath_version")?,
            external_ids: reader.field("external_ids")?,
            fail_mode: reader.field("fail_mode")?,
            mcast_snooping_enable: reader.field("mcast_snooping_enable")?,
            other_config: reader.field("other_config")?,
            rstp_enable: reader.field("rstp_enable")?,
            stp_enable: reader.field("stp_enable")?,
            auto_attach: reader.raw("auto_attach"),
            controller: reader.raw("controller"),
            flood_vlans: reader.raw("flood_vlans"),
            flow_tables: reader.raw("flow_tables"),
            ipfix: reader.raw("ipfix"),
            mirrors: reader.raw("mirrors"),
            netflow: reader.raw("netflow"),
            protocols: reader.raw("protocols"),
            rstp_status: reader.raw("rstp_status"),
            sflow: reader.raw("sflow"),
            status: reader.raw("status"),
            uuid: reader.into_uuid(),
        })
    }

    fn uuid(&self) -> &str {
        &self.uuid
    }
}
