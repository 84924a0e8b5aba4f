//! Operation Executor.
//!
//! Drives one request through
//! `ReadingInputs -> Computing -> (Success | DomainError) -> Committing -> Done`.
//! Any reader, writer or transport error moves the request to `Failed`.

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use cafs_resource::{
    AsyncResourceStore, MaterializedResource, PotentialOutputDescriptor, ResourceContent,
};

use crate::arithmetic::{compute, Outcome};
use crate::error::{OperationError, Result};
use crate::materializer::ResourceMaterializer;
use crate::operation::Operation;
use crate::reader::ResourceReader;
use crate::request::{Binding, OperationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    ReadingInputs,
    Computing,
    Success,
    DomainError,
    Committing,
    Done,
    Failed,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionState::ReadingInputs => "reading_inputs",
            ExecutionState::Computing => "computing",
            ExecutionState::Success => "success",
            ExecutionState::DomainError => "domain_error",
            ExecutionState::Committing => "committing",
            ExecutionState::Done => "done",
            ExecutionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Which set of outputs a finished execution committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Success,
    DomainError,
}

/// A committed output under the request key that declared it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedOutput {
    pub key: String,
    pub resource: MaterializedResource,
}

/// The result of a finished execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub operation: Operation,
    pub branch: Branch,
    /// In commit order.
    pub committed: Vec<CommittedOutput>,
}

/// Runs operations against a shared store.
pub struct OperationExecutor<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for OperationExecutor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AsyncResourceStore + ?Sized> OperationExecutor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn execute(&self, request: &OperationRequest) -> Result<Execution> {
        let operation = request.operation;
        let result = self.run(request).await;
        if let Err(e) = &result {
            transition(operation, ExecutionState::Failed);
            debug!(%operation, error = %e, "execution failed");
        }
        result
    }

    async fn run(&self, request: &OperationRequest) -> Result<Execution> {
        let operation = request.operation;

        transition(operation, ExecutionState::ReadingInputs);
        let reader = ResourceReader::new(self.store.as_ref());
        let reads: Vec<_> = request
            .inputs
            .iter()
            .map(|input| reader.read_resource(&input.descriptor))
            .collect();
        let operands = try_join_all(reads).await?;

        transition(operation, ExecutionState::Computing);
        let outcome = compute(operation, &operands)?;

        let (branch, plan) = match outcome {
            Outcome::Values(values) => {
                transition(operation, ExecutionState::Success);
                if values.len() != request.outputs.len() {
                    return Err(OperationError::invalid_request(format!(
                        "{} produced {} value(s) for {} output(s)",
                        operation,
                        values.len(),
                        request.outputs.len()
                    )));
                }
                let plan = request
                    .outputs
                    .iter()
                    .zip(values)
                    .map(|(binding, value)| (binding, ResourceContent::numeric(value)))
                    .collect::<Vec<_>>();
                (Branch::Success, plan)
            }
            Outcome::DomainError(payload) => {
                transition(operation, ExecutionState::DomainError);
                let binding = request.error_output.as_ref().ok_or_else(|| {
                    OperationError::invalid_request(format!(
                        "{} has no error output to commit {}",
                        operation, payload.name
                    ))
                })?;
                (Branch::DomainError, vec![(binding, payload.into())])
            }
        };

        transition(operation, ExecutionState::Committing);
        let committed = self.commit(operation, plan).await?;

        transition(operation, ExecutionState::Done);
        Ok(Execution {
            operation,
            branch,
            committed,
        })
    }

    /// Materialize outputs one after the other.
    ///
    /// Writes are not rolled back: when a later write fails, earlier ones
    /// stay in the store and are logged as orphaned.
    async fn commit(
        &self,
        operation: Operation,
        plan: Vec<(&Binding<PotentialOutputDescriptor>, ResourceContent)>,
    ) -> Result<Vec<CommittedOutput>> {
        let materializer = ResourceMaterializer::new(self.store.as_ref());
        let mut committed: Vec<CommittedOutput> = Vec::with_capacity(plan.len());

        for (binding, content) in plan {
            match materializer.materialize(&binding.descriptor, &content).await {
                Ok(resource) => committed.push(CommittedOutput {
                    key: binding.key.clone(),
                    resource,
                }),
                Err(e) => {
                    for orphan in &committed {
                        warn!(
                            %operation,
                            key = %orphan.key,
                            path = %orphan.resource.path,
                            failed_key = %binding.key,
                            "output committed before a later write failed; left orphaned"
                        );
                    }
                    return Err(e.into());
                }
            }
        }

        Ok(committed)
    }
}

fn transition(operation: Operation, state: ExecutionState) {
    debug!(%operation, %state, "execution state");
}
