//! # cafs-resource
//!
//! Resource model for operations whose operands and results live in a
//! content-addressable store (CAFS).
//!
//! Operands are never passed inline. A caller hands over a
//! [`ResourceDescriptor`] pointing at an already-materialized resource, and a
//! [`PotentialOutputDescriptor`] for every result it expects back. Results are
//! committed to the store before the caller can see them, producing a
//! [`MaterializedResource`].
//!
//! ## Layers
//!
//! - [`descriptor`]: identity metadata for existing and future resources.
//! - [`content`]: the canonical content shapes, [`NumericPayload`] and
//!   [`ErrorPayload`], unified as [`ResourceContent`].
//! - [`traits`]: the async store seam ([`AsyncResourceReader`] and
//!   [`AsyncResourceWriter`]) implemented by transports.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cafs_resource::{AsyncResourceReader, NumericPayload};
//!
//! async fn read_number(store: &dyn AsyncResourceReader, path: &str) -> Result<i64, Error> {
//!     let raw = store.retrieve(path).await?.ok_or_else(|| Error::not_found(path))?;
//!     NumericPayload::decode(path, &raw)
//! }
//! ```

pub mod content;
pub mod descriptor;
pub mod error;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod in_memory;

pub use content::{ErrorPayload, NumericPayload, ResourceContent};
pub use descriptor::{
    is_store_path, CreationContext, MaterializedResource, PotentialOutputDescriptor,
    ResourceDescriptor,
};
pub use error::{Error, Result};
pub use traits::{AsyncResourceReader, AsyncResourceStore, AsyncResourceWriter, StoreReceipt};

#[cfg(any(test, feature = "test-utils"))]
pub use in_memory::InMemoryResourceStore;

/// Version of the canonical descriptor and payload schema in this crate.
///
/// Bump this whenever a wire field is renamed or its meaning changes.
pub const RESOURCE_SCHEMA_VERSION: u32 = 1;
