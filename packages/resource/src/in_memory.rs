//! In-memory resource store for tests.
//!
//! Mirrors the external store's contract: every write gets a fresh address
//! under `{typeId}/`, reads of unknown addresses return `None`. Failures can
//! be injected to exercise transport error paths.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::content::ResourceContent;
use crate::descriptor::PotentialOutputDescriptor;
use crate::error::{Error, Result};
use crate::traits::{AsyncResourceReader, AsyncResourceWriter, StoreReceipt};

/// A write the store accepted, kept for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub descriptor: PotentialOutputDescriptor,
    pub content: ResourceContent,
    pub path: String,
}

#[derive(Default)]
struct State {
    entries: HashMap<String, String>,
    writes: Vec<RecordedWrite>,
    next_id: u64,
    failing_reads: Vec<String>,
    writes_before_failure: Option<usize>,
}

/// A content store held in memory.
///
/// # Example
///
/// ```rust,ignore
/// use cafs_resource::{InMemoryResourceStore, AsyncResourceReader};
///
/// let store = InMemoryResourceStore::new();
/// let path = store.insert_numeric("TYPE-Natural", 5);
/// assert!(store.retrieve(&path).await?.is_some());
/// ```
#[derive(Default)]
pub struct InMemoryResourceStore {
    state: Mutex<State>,
}

impl InMemoryResourceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed raw content under a fresh address and return the address.
    pub fn insert_raw(&self, type_id: &str, raw: impl Into<String>) -> String {
        let mut state = self.state.lock().unwrap();
        let path = Self::next_path(&mut state, type_id);
        state.entries.insert(path.clone(), raw.into());
        path
    }

    /// Seed a numeric resource and return its address.
    pub fn insert_numeric(&self, type_id: &str, identity: i64) -> String {
        let raw = ResourceContent::numeric(identity)
            .to_canonical_string()
            .unwrap();
        self.insert_raw(type_id, raw)
    }

    /// Make reads of `path` fail with a transport error.
    pub fn fail_reads_of(self, path: impl Into<String>) -> Self {
        self.state.lock().unwrap().failing_reads.push(path.into());
        self
    }

    /// Accept `count` writes, then fail every later write with a transport
    /// error.
    pub fn fail_writes_after(self, count: usize) -> Self {
        self.state.lock().unwrap().writes_before_failure = Some(count);
        self
    }

    /// All writes accepted so far, in order.
    pub fn recorded_writes(&self) -> Vec<RecordedWrite> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Number of stored entries, seeded ones included.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_path(state: &mut State, type_id: &str) -> String {
        let id = state.next_id;
        state.next_id += 1;
        format!("{}/{:016x}", type_id, id)
    }
}

#[async_trait]
impl AsyncResourceReader for InMemoryResourceStore {
    async fn retrieve(&self, path: &str) -> Result<Option<String>> {
        let state = self
            .state
            .lock()
            .map_err(|_| Error::transport("lock poisoned"))?;

        if state.failing_reads.iter().any(|p| p == path) {
            return Err(Error::transport(format!("injected read failure for {}", path)));
        }

        Ok(state.entries.get(path).cloned())
    }
}

#[async_trait]
impl AsyncResourceWriter for InMemoryResourceStore {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt> {
        let raw = content.to_canonical_string()?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::transport("lock poisoned"))?;

        if let Some(limit) = state.writes_before_failure {
            if state.writes.len() >= limit {
                return Err(Error::transport("injected write failure"));
            }
        }

        let path = Self::next_path(&mut state, &descriptor.type_id);
        state.entries.insert(path.clone(), raw);
        state.writes.push(RecordedWrite {
            descriptor: descriptor.clone(),
            content: content.clone(),
            path: path.clone(),
        });

        Ok(StoreReceipt {
            path,
            timestamp: None,
            content_hash: None,
        })
    }
}
