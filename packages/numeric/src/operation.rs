//! The operations and their fixed argument schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical name of the output that carries a domain failure.
pub const ERROR_OUTPUT: &str = "errorOutput";

/// A numeric operation the executor can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Double,
}

/// Logical argument names of one operation.
///
/// Inputs are listed in operand order; outputs in the order their values are
/// computed and committed.
#[derive(Debug, PartialEq, Eq)]
pub struct OperationSchema {
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    /// Present when the operation can fail in its domain.
    pub error_output: Option<&'static str>,
}

impl OperationSchema {
    /// Every logical name in the schema, inputs first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .copied()
            .chain(self.error_output)
    }
}

const ADD: OperationSchema = OperationSchema {
    inputs: &["addendOne", "addendTwo"],
    outputs: &["sum"],
    error_output: None,
};

const SUBTRACT: OperationSchema = OperationSchema {
    inputs: &["minuend", "subtrahend"],
    outputs: &["difference"],
    error_output: Some(ERROR_OUTPUT),
};

const MULTIPLY: OperationSchema = OperationSchema {
    inputs: &["multiplicand", "multiplier"],
    outputs: &["product"],
    error_output: None,
};

const DIVIDE: OperationSchema = OperationSchema {
    inputs: &["dividend", "divisor"],
    outputs: &["quotient", "remainder"],
    error_output: Some(ERROR_OUTPUT),
};

const DOUBLE: OperationSchema = OperationSchema {
    inputs: &["number"],
    outputs: &["doubled"],
    error_output: None,
};

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Double => "double",
        }
    }

    pub fn schema(self) -> &'static OperationSchema {
        match self {
            Operation::Add => &ADD,
            Operation::Subtract => &SUBTRACT,
            Operation::Multiply => &MULTIPLY,
            Operation::Divide => &DIVIDE,
            Operation::Double => &DOUBLE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}
