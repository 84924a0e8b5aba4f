//! # cafs-numeric-server
//!
//! HTTP surface for the numeric operations: one `POST` route per operation,
//! plus liveness and a read-only debugging endpoint.
//!
//! | Route                    | Purpose                                   |
//! |--------------------------|-------------------------------------------|
//! | `POST /add` ...          | run an operation, body keyed by role ids  |
//! | `GET /`, `GET /health`   | liveness, never touches the store         |
//! | `GET /test-cafs?id=path` | read one numeric resource                 |

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use cafs_http::CafsHttpStore;

pub use config::Config;
pub use error::{ApiError, PublicErrorCode};
pub use routes::router;
pub use state::AppState;

/// Build the state for a configuration, backed by the HTTP store.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let store = CafsHttpStore::new(config.store_config()?)?;
    let roles = config.load_role_table()?;

    info!(
        base_url = %store.config().base_url,
        protocol = %store.config().protocol,
        timeout_secs = store.config().timeout.as_secs(),
        shape = %config.response_shape,
        "store configured"
    );

    Ok(AppState::new(Arc::new(store), roles, config.response_shape))
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
