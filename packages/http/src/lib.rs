//! # cafs-http
//!
//! HTTP client for the content-addressable store (CAFS).
//!
//! This crate implements the `cafs-resource` store traits on top of the
//! store's two HTTP endpoints:
//!
//! - `GET {base}/retrieve/{path}` returns `{ "content": "<json string>" }`.
//! - `POST {base}/store` accepts a new resource and returns the address the
//!   store assigned to it.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use cafs_http::{CafsHttpStore, StoreConfig, StoreProtocol};
//!
//! let config = StoreConfig::new("http://localhost:9000/api/cafs")?
//!     .with_timeout(Duration::from_secs(10))
//!     .with_protocol(StoreProtocol::Meta);
//! let store = CafsHttpStore::new(config)?;
//! ```
//!
//! Requests go through an [`HttpExecutor`], so the store client can be
//! exercised without a network in unit tests.

pub mod config;
pub mod error;
pub mod executor;
pub mod protocol;
pub mod store;
pub mod types;

pub use config::{StoreConfig, StoreProtocol};
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use store::CafsHttpStore;
pub use types::{HttpRequest, HttpResponse, Method};
