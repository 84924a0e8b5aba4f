//! Shared application state.

use std::sync::Arc;

use cafs_numeric::{OperationExecutor, ResponseShape, RoleTable};
use cafs_resource::AsyncResourceStore;

/// Immutable state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub executor: OperationExecutor<dyn AsyncResourceStore>,
    pub roles: Arc<RoleTable>,
    pub shape: ResponseShape,
}

impl AppState {
    pub fn new(store: Arc<dyn AsyncResourceStore>, roles: RoleTable, shape: ResponseShape) -> Self {
        Self {
            executor: OperationExecutor::new(store),
            roles: Arc::new(roles),
            shape,
        }
    }

    pub fn store(&self) -> &dyn AsyncResourceStore {
        self.executor.store().as_ref()
    }
}
