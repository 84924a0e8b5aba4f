//! Async store traits.
//!
//! The store is an external, content-addressable service. These traits are
//! the only way the rest of the workspace reaches it, so transports (HTTP,
//! in-memory) can be swapped without touching reader or writer logic.
//!
//! Methods take `&self`: a store client is shared between concurrent reads
//! of the same request and across requests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::content::ResourceContent;
use crate::descriptor::PotentialOutputDescriptor;
use crate::error::Result;

/// Read raw content from the store.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn AsyncResourceReader>`.
#[async_trait]
pub trait AsyncResourceReader: Send + Sync {
    /// Retrieve the raw content stored at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The path does not resolve in the store.
    /// * `Ok(Some(content))` - The stored content string.
    /// * `Err(Error)` - The store could not be queried.
    async fn retrieve(&self, path: &str) -> Result<Option<String>>;
}

/// What the store reports back after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReceipt {
    /// Address assigned by the store.
    pub path: String,
    /// Write time, when the store reports one.
    pub timestamp: Option<String>,
    /// Content hash, when the store reports one.
    pub content_hash: Option<String>,
}

/// Commit new content to the store.
///
/// Every call creates a new entry. There is no overwrite and no idempotency
/// key: writing the same descriptor twice yields two entries, which may or
/// may not share an address.
#[async_trait]
pub trait AsyncResourceWriter: Send + Sync {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt>;
}

/// Combined read/write access.
///
/// Automatically implemented for any type that implements both
/// `AsyncResourceReader` and `AsyncResourceWriter`.
pub trait AsyncResourceStore: AsyncResourceReader + AsyncResourceWriter {}
impl<T: AsyncResourceReader + AsyncResourceWriter + ?Sized> AsyncResourceStore for T {}

// Blanket implementations for references and smart pointers

#[async_trait]
impl<T: AsyncResourceReader + ?Sized> AsyncResourceReader for &T {
    async fn retrieve(&self, path: &str) -> Result<Option<String>> {
        (**self).retrieve(path).await
    }
}

#[async_trait]
impl<T: AsyncResourceWriter + ?Sized> AsyncResourceWriter for &T {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt> {
        (**self).store(descriptor, content).await
    }
}

#[async_trait]
impl<T: AsyncResourceReader + ?Sized> AsyncResourceReader for Box<T> {
    async fn retrieve(&self, path: &str) -> Result<Option<String>> {
        self.as_ref().retrieve(path).await
    }
}

#[async_trait]
impl<T: AsyncResourceWriter + ?Sized> AsyncResourceWriter for Box<T> {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt> {
        self.as_ref().store(descriptor, content).await
    }
}

#[async_trait]
impl<T: AsyncResourceReader + ?Sized> AsyncResourceReader for Arc<T> {
    async fn retrieve(&self, path: &str) -> Result<Option<String>> {
        self.as_ref().retrieve(path).await
    }
}

#[async_trait]
impl<T: AsyncResourceWriter + ?Sized> AsyncResourceWriter for Arc<T> {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt> {
        self.as_ref().store(descriptor, content).await
    }
}
