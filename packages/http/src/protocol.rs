//! Wire shapes of the store service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cafs_resource::{CreationContext, PotentialOutputDescriptor, StoreReceipt};

use crate::error::Error;

/// Body of a successful `GET /retrieve/{path}`.
#[derive(Debug, Deserialize)]
pub struct RetrieveEnvelope {
    /// Stored content. Normally a JSON document encoded as a string; some
    /// store builds return the document inline.
    pub content: Value,
}

impl RetrieveEnvelope {
    /// The stored content as a raw string.
    pub fn into_raw(self) -> String {
        match self.content {
            Value::String(raw) => raw,
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMeta<'a> {
    pub id: &'a str,
    pub type_id: &'a str,
    pub role_id: &'a str,
    pub execution_id: &'a str,
}

/// `POST /store` body for [`StoreProtocol::Meta`](crate::StoreProtocol::Meta).
#[derive(Debug, Serialize)]
pub struct MetaStoreBody<'a> {
    pub meta: StoreMeta<'a>,
    /// Canonical content, encoded as a JSON string.
    pub content: String,
}

impl<'a> MetaStoreBody<'a> {
    pub fn new(descriptor: &'a PotentialOutputDescriptor, content: String) -> Self {
        Self {
            meta: StoreMeta {
                id: &descriptor.id,
                type_id: &descriptor.type_id,
                role_id: &descriptor.creation_context.role_id,
                execution_id: &descriptor.creation_context.execution_id,
            },
            content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEnvelope<'a> {
    pub id: &'a str,
    pub type_id: &'a str,
    pub creation_context: &'a CreationContext,
    pub timestamp: &'a str,
    pub content: Value,
}

/// `POST /store` body for
/// [`StoreProtocol::Resource`](crate::StoreProtocol::Resource).
#[derive(Debug, Serialize)]
pub struct ResourceStoreBody<'a> {
    pub resource: ResourceEnvelope<'a>,
}

impl<'a> ResourceStoreBody<'a> {
    pub fn new(
        descriptor: &'a PotentialOutputDescriptor,
        timestamp: &'a str,
        content: Value,
    ) -> Self {
        Self {
            resource: ResourceEnvelope {
                id: &descriptor.id,
                type_id: &descriptor.type_id,
                creation_context: &descriptor.creation_context,
                timestamp,
                content,
            },
        }
    }
}

/// Body of a successful `POST /store`, in either of the shapes stores
/// answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoreResponse {
    Stored {
        #[serde(rename = "storagePath")]
        storage_path: String,
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default, rename = "contentHash")]
        content_hash: Option<String>,
    },
    Acknowledged {
        success: bool,
        #[serde(default)]
        path: Option<String>,
    },
}

impl StoreResponse {
    pub fn into_receipt(self) -> Result<StoreReceipt, Error> {
        match self {
            StoreResponse::Stored {
                storage_path,
                timestamp,
                content_hash,
            } => Ok(StoreReceipt {
                path: storage_path,
                timestamp,
                content_hash,
            }),
            StoreResponse::Acknowledged {
                success: true,
                path: Some(path),
            } => Ok(StoreReceipt {
                path,
                timestamp: None,
                content_hash: None,
            }),
            StoreResponse::Acknowledged { success: false, .. } => Err(Error::Rejected {
                message: "store reported success: false".to_string(),
            }),
            StoreResponse::Acknowledged { path: None, .. } => Err(Error::Rejected {
                message: "store acknowledged the write without a path".to_string(),
            }),
        }
    }
}
