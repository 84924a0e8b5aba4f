//! Descriptors for existing and future resources.

use serde::{Deserialize, Serialize};

/// Binds a resource to the workflow role and execution that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationContext {
    pub role_id: String,
    pub execution_id: String,
}

impl CreationContext {
    pub fn new(role_id: impl Into<String>, execution_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            execution_id: execution_id.into(),
        }
    }
}

/// An already-materialized resource.
///
/// `path` is the address the store assigned when the resource was written.
/// Only descriptors of this type can be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub id: String,
    pub type_id: String,
    pub path: String,
    pub creation_context: CreationContext,
}

/// Identity of a resource that does not exist yet.
///
/// Carries the same identity fields as [`ResourceDescriptor`] but no path and
/// no content. It is consumed by a writer, never by a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialOutputDescriptor {
    pub id: String,
    pub type_id: String,
    pub creation_context: CreationContext,
}

impl PotentialOutputDescriptor {
    pub fn new(
        id: impl Into<String>,
        type_id: impl Into<String>,
        creation_context: CreationContext,
    ) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            creation_context,
        }
    }

    /// Combine this descriptor with the address and timestamp the store
    /// assigned on write.
    pub fn into_materialized(
        self,
        path: String,
        timestamp: String,
        content_hash: Option<String>,
    ) -> MaterializedResource {
        MaterializedResource {
            id: self.id,
            type_id: self.type_id,
            creation_context: self.creation_context,
            path,
            timestamp,
            content_hash,
        }
    }
}

/// A resource committed to the store.
///
/// Produced only by materialization. The content behind `path` is
/// write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedResource {
    pub id: String,
    pub type_id: String,
    pub creation_context: CreationContext,
    pub path: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// Whether `path` is a store address that maps one-to-one onto URL path
/// segments: non-empty, `/`-separated, with no empty, `.` or `..` segment.
pub fn is_store_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
