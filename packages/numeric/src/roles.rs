//! Mapping from logical argument names to request keys.
//!
//! Workflow engines key request bodies by role identifier. The same logical
//! argument (`addendOne`, `sum`, ...) may be called `AddendOne` by one
//! deployment and `RER-456GInRLCbpCes1478hb` by another. The table is fixed
//! at startup and consulted once per request, at the boundary.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{OperationError, Result};
use crate::operation::Operation;

/// Request key for every `(operation, logical name)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    keys: HashMap<(Operation, &'static str), String>,
}

impl Default for RoleTable {
    /// Keys are the logical names in PascalCase (`AddendOne`, `Sum`,
    /// `ErrorOutput`).
    fn default() -> Self {
        let keys = Operation::ALL
            .into_iter()
            .flat_map(|op| op.schema().names().map(move |name| (op, name)))
            .map(|(op, name)| ((op, name), pascal_case(name)))
            .collect();
        Self { keys }
    }
}

impl RoleTable {
    /// The request key for a logical name.
    ///
    /// Names outside the operation's schema fall back to themselves.
    pub fn key<'a>(&'a self, operation: Operation, name: &'a str) -> &'a str {
        self.keys
            .get(&(operation, name))
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Override entries from a JSON document shaped like
    /// `{ "add": { "sum": "RER-0LD9l1uRbrdQLkxGFc6k" } }`.
    ///
    /// Entries not mentioned keep their defaults.
    pub fn with_overrides_json(self, json: &str) -> Result<Self> {
        let overrides: BTreeMap<Operation, BTreeMap<String, String>> =
            serde_json::from_str(json).map_err(|e| OperationError::invalid_role_table(e.to_string()))?;
        self.with_overrides(overrides)
    }

    pub fn with_overrides(
        mut self,
        overrides: BTreeMap<Operation, BTreeMap<String, String>>,
    ) -> Result<Self> {
        for (operation, entries) in overrides {
            for (name, key) in entries {
                let logical = operation
                    .schema()
                    .names()
                    .find(|candidate| *candidate == name)
                    .ok_or_else(|| {
                        OperationError::invalid_role_table(format!(
                            "'{}' is not an argument of {}",
                            name, operation
                        ))
                    })?;

                if key.is_empty() {
                    return Err(OperationError::invalid_role_table(format!(
                        "empty key for {}.{}",
                        operation, name
                    )));
                }

                self.keys.insert((operation, logical), key);
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Two arguments of the same operation must not share a request key.
    fn validate(&self) -> Result<()> {
        for operation in Operation::ALL {
            let mut seen = HashSet::new();
            for name in operation.schema().names() {
                let key = self.key(operation, name);
                if !seen.insert(key) {
                    return Err(OperationError::invalid_role_table(format!(
                        "key '{}' is used twice in {}",
                        key, operation
                    )));
                }
            }
        }
        Ok(())
    }
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
