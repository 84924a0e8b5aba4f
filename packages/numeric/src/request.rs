//! Boundary validation of operation requests.
//!
//! A request body is a JSON object keyed by role identifiers. Each key that
//! the operation's schema names must hold a descriptor of the right kind:
//! a [`ResourceDescriptor`] for inputs, a [`PotentialOutputDescriptor`] for
//! outputs. Everything is checked here, once, before any store call.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use cafs_resource::{is_store_path, PotentialOutputDescriptor, ResourceDescriptor};

use crate::error::{OperationError, Result};
use crate::operation::Operation;
use crate::roles::RoleTable;

/// A descriptor together with the request key it arrived under.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<D> {
    pub key: String,
    pub descriptor: D,
}

/// A validated request for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    /// In operand order.
    pub inputs: Vec<Binding<ResourceDescriptor>>,
    /// In schema output order.
    pub outputs: Vec<Binding<PotentialOutputDescriptor>>,
    /// Where a domain failure is committed, when the operation has one and
    /// the caller declared it.
    pub error_output: Option<Binding<PotentialOutputDescriptor>>,
}

impl OperationRequest {
    /// Validate a request body against the operation's schema.
    ///
    /// Keys the schema does not name are ignored.
    pub fn from_body(operation: Operation, body: &Value, roles: &RoleTable) -> Result<Self> {
        let object = body.as_object().ok_or_else(|| {
            OperationError::invalid_request("request body must be a JSON object")
        })?;

        let schema = operation.schema();

        let inputs = schema
            .inputs
            .iter()
            .map(|name| bind::<ResourceDescriptor>(object, roles.key(operation, name)))
            .collect::<Result<Vec<_>>>()?;

        for input in &inputs {
            if !is_store_path(&input.descriptor.path) {
                return Err(OperationError::invalid_request(format!(
                    "'{}' has an invalid path '{}'",
                    input.key, input.descriptor.path
                )));
            }
        }

        let outputs = schema
            .outputs
            .iter()
            .map(|name| bind::<PotentialOutputDescriptor>(object, roles.key(operation, name)))
            .collect::<Result<Vec<_>>>()?;

        // Optional: without it a domain failure cannot be committed and the
        // request fails instead.
        let error_output = schema
            .error_output
            .map(|name| roles.key(operation, name))
            .filter(|key| object.contains_key(*key))
            .map(|key| bind::<PotentialOutputDescriptor>(object, key))
            .transpose()?;

        Ok(Self {
            operation,
            inputs,
            outputs,
            error_output,
        })
    }

    /// Request keys of every output this request declares.
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .chain(self.error_output.as_ref())
            .map(|binding| binding.key.as_str())
    }
}

fn bind<D: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Result<Binding<D>> {
    let value = object
        .get(key)
        .ok_or_else(|| OperationError::invalid_request(format!("missing '{}'", key)))?;

    let descriptor = <D as serde::Deserialize>::deserialize(value)
        .map_err(|e| OperationError::invalid_request(format!("invalid '{}': {}", key, e)))?;

    Ok(Binding {
        key: key.to_string(),
        descriptor,
    })
}
