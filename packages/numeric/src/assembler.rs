//! Response Assembler: committed outputs to response body. No I/O.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cafs_resource::MaterializedResource;

use crate::executor::Execution;

/// Which response body to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "outputs": { key: { path, timestamp } } }`
    #[default]
    Outputs,
    /// `{ "outputMap": { key: MaterializedResource } }`
    OutputMap,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShape::Outputs => f.write_str("outputs"),
            ResponseShape::OutputMap => f.write_str("output-map"),
        }
    }
}

impl FromStr for ResponseShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outputs" => Ok(ResponseShape::Outputs),
            "output-map" | "outputMap" => Ok(ResponseShape::OutputMap),
            other => Err(format!(
                "unknown response shape '{}', expected 'outputs' or 'output-map'",
                other
            )),
        }
    }
}

/// Address of one committed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRef {
    pub path: String,
    pub timestamp: String,
}

impl From<&MaterializedResource> for OutputRef {
    fn from(resource: &MaterializedResource) -> Self {
        Self {
            path: resource.path.clone(),
            timestamp: resource.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationResponse {
    Outputs {
        outputs: BTreeMap<String, OutputRef>,
    },
    OutputMap {
        #[serde(rename = "outputMap")]
        output_map: BTreeMap<String, MaterializedResource>,
    },
}

impl OperationResponse {
    /// Keys of the response, one per committed output.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            OperationResponse::Outputs { outputs } => outputs.keys().map(String::as_str).collect(),
            OperationResponse::OutputMap { output_map } => {
                output_map.keys().map(String::as_str).collect()
            }
        }
    }
}

/// Build the response for a finished execution.
///
/// Each committed output appears under the request key that supplied its
/// descriptor.
pub fn assemble(execution: &Execution, shape: ResponseShape) -> OperationResponse {
    match shape {
        ResponseShape::Outputs => OperationResponse::Outputs {
            outputs: execution
                .committed
                .iter()
                .map(|c| (c.key.clone(), OutputRef::from(&c.resource)))
                .collect(),
        },
        ResponseShape::OutputMap => OperationResponse::OutputMap {
            output_map: execution
                .committed
                .iter()
                .map(|c| (c.key.clone(), c.resource.clone()))
                .collect(),
        },
    }
}
