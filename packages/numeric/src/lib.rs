//! # cafs-numeric
//!
//! Numeric operations whose operands and results live in a
//! content-addressable store.
//!
//! A request names its inputs by [`ResourceDescriptor`] and its outputs by
//! [`PotentialOutputDescriptor`]. The [`OperationExecutor`] reads the inputs
//! concurrently, computes, and commits every result to the store before the
//! caller sees it. Domain failures such as division by zero are not errors
//! at this level: they are committed as an `ErrorOutput` resource and the
//! request succeeds.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cafs_numeric::{assemble, Operation, OperationExecutor, OperationRequest,
//!     ResponseShape, RoleTable};
//!
//! let request = OperationRequest::from_body(Operation::Add, &body, &RoleTable::default())?;
//! let execution = OperationExecutor::new(Arc::new(store)).execute(&request).await?;
//! let response = assemble(&execution, ResponseShape::Outputs);
//! ```
//!
//! [`ResourceDescriptor`]: cafs_resource::ResourceDescriptor
//! [`PotentialOutputDescriptor`]: cafs_resource::PotentialOutputDescriptor

pub mod arithmetic;
pub mod assembler;
pub mod error;
pub mod executor;
pub mod materializer;
pub mod operation;
pub mod reader;
pub mod request;
pub mod roles;

pub use arithmetic::{compute, Outcome, DIVIDE_BY_ZERO, SUBTRACT_INVALID_INPUT};
pub use assembler::{assemble, OperationResponse, OutputRef, ResponseShape};
pub use error::{OperationError, Result};
pub use executor::{Branch, CommittedOutput, Execution, ExecutionState, OperationExecutor};
pub use materializer::ResourceMaterializer;
pub use operation::{Operation, OperationSchema, ERROR_OUTPUT};
pub use reader::ResourceReader;
pub use request::{Binding, OperationRequest};
pub use roles::RoleTable;
