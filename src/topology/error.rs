use std::fmt::Display;

use thiserror::Error;

use crate::parsers::ovsdb_parser::record::RecordError;

/// Which sub-query of the topology join failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyStage {
    Bridges,
    Ports,
}

impl Display for TopologyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyStage::Bridges => write!(f, "bridges"),
            TopologyStage::Ports => write!(f, "ports"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OvsdbError {
    /// The collaborator's transact call failed.
    #[error("the '{query}' query failed: {source}")]
    QueryExecution {
        query: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Tables queried here are never empty on a live switch, so no rows is a failure.
    #[error("the '{query}' query did not return any rows")]
    EmptyResult { query: String },
    #[error("the '{query}' query returned an invalid row: {source}")]
    Record { query: String, source: RecordError },
    #[error("couldn't get list of {stage}: {source}")]
    Topology {
        stage: TopologyStage,
        source: Box<OvsdbError>,
    },
}

impl OvsdbError {
    pub fn in_stage(self, stage: TopologyStage) -> Self {
        OvsdbError::Topology {
            stage,
            source: Box::new(self),
        }
    }

    /// Query text of the failing query, looking through topology wrapping.
    pub fn query(&self) -> &str {
        match self {
            OvsdbError::QueryExecution { query, .. }
            | OvsdbError::EmptyResult { query }
            | OvsdbError::Record { query, .. } => query,
            OvsdbError::Topology { source, .. } => source.query(),
        }
    }
}

pub type OvsdbResult<T> = Result<T, OvsdbError>;
