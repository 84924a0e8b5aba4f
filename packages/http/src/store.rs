//! HTTP client for the content-addressable store.
//!
//! ## Protocol
//!
//! - `retrieve(path)` → `GET {base}/retrieve/{path}` → `{ content }`
//! - `store(descriptor, content)` → `POST {base}/store` → receipt
//!
//! A 404 on retrieve means the address does not resolve. Every other
//! non-2xx status is a transport failure.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use cafs_resource::{
    is_store_path, AsyncResourceReader, AsyncResourceWriter, Error as ResourceError,
    PotentialOutputDescriptor, ResourceContent, StoreReceipt,
};

use crate::config::{StoreConfig, StoreProtocol};
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::protocol::{MetaStoreBody, ResourceStoreBody, RetrieveEnvelope, StoreResponse};
use crate::types::{HttpRequest, HttpResponse};

/// A store client speaking the CAFS retrieve/store protocol over HTTP.
///
/// # Example
///
/// ```ignore
/// use cafs_http::{CafsHttpStore, StoreConfig};
/// use cafs_resource::AsyncResourceReader;
///
/// let store = CafsHttpStore::new(StoreConfig::new("http://localhost:9000/api/cafs")?)?;
/// let raw = store.retrieve("TYPE-Natural/abc").await?;
/// ```
#[derive(Clone)]
pub struct CafsHttpStore {
    config: StoreConfig,
    executor: Arc<dyn HttpExecutor>,
}

impl CafsHttpStore {
    /// Create a store client backed by reqwest, bounded by the configured
    /// timeout.
    pub fn new(config: StoreConfig) -> Result<Self, Error> {
        let executor = ReqwestExecutor::new(config.timeout)?;
        Ok(Self::with_executor(config, Arc::new(executor)))
    }

    /// Create a store client with a custom executor.
    pub fn with_executor(config: StoreConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn ensure_success(response: HttpResponse) -> Result<HttpResponse, Error> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::Status {
                status: response.status,
                status_text: response.status_text,
                body: response.body_text,
            })
        }
    }

    fn store_request(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
        timestamp: &str,
    ) -> Result<HttpRequest, ResourceError> {
        let url = self.config.endpoint(["store"]).map_err(ResourceError::from)?;

        let request = match self.config.protocol {
            StoreProtocol::Meta => HttpRequest::post(url.as_str())
                .with_body(MetaStoreBody::new(descriptor, content.to_canonical_string()?))?,
            StoreProtocol::Resource => HttpRequest::post(url.as_str()).with_body(
                ResourceStoreBody::new(descriptor, timestamp, content.to_json()?),
            )?,
        };

        Ok(request)
    }
}

#[async_trait]
impl AsyncResourceReader for CafsHttpStore {
    async fn retrieve(&self, path: &str) -> Result<Option<String>, ResourceError> {
        // URL normalization would drop `.`/`..` segments and ask the store
        // for a different address. Such a path resolves to nothing.
        if !is_store_path(path) {
            debug!(path, "not a store path");
            return Ok(None);
        }

        let url = self
            .config
            .endpoint(std::iter::once("retrieve").chain(path.split('/')))?;

        debug!(%url, "retrieving resource");

        let response = self.executor.execute(&HttpRequest::get(url.as_str())).await?;

        if response.is_not_found() {
            return Ok(None);
        }

        let response = Self::ensure_success(response)?;

        let envelope: RetrieveEnvelope = response.json().map_err(|e| {
            ResourceError::malformed(path, format!("invalid retrieve response: {}", e))
        })?;

        Ok(Some(envelope.into_raw()))
    }
}

#[async_trait]
impl AsyncResourceWriter for CafsHttpStore {
    async fn store(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<StoreReceipt, ResourceError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let request = self.store_request(descriptor, content, &timestamp)?;

        debug!(
            url = %request.url,
            id = %descriptor.id,
            role_id = %descriptor.creation_context.role_id,
            protocol = %self.config.protocol,
            "storing resource"
        );

        let response = Self::ensure_success(self.executor.execute(&request).await?)?;

        let parsed: StoreResponse = response.json().map_err(Error::from)?;
        let mut receipt = parsed.into_receipt()?;

        // The resource protocol stamps the write client-side.
        if self.config.protocol == StoreProtocol::Resource && receipt.timestamp.is_none() {
            receipt.timestamp = Some(timestamp);
        }

        debug!(path = %receipt.path, "stored resource");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::MockExecutor;
    use crate::types::Method;
    use cafs_resource::{CreationContext, ErrorPayload};
    use serde_json::json;

    const BASE: &str = "http://store.test/api/cafs";

    fn store_with(executor: MockExecutor, protocol: StoreProtocol) -> CafsHttpStore {
        let config = StoreConfig::new(BASE).unwrap().with_protocol(protocol);
        CafsHttpStore::with_executor(config, Arc::new(executor))
    }

    fn descriptor() -> PotentialOutputDescriptor {
        PotentialOutputDescriptor::new(
            "RES-Sum",
            "TYPE-Natural",
            CreationContext::new("Sum", "EXEC-1"),
        )
    }

    #[tokio::test]
    async fn retrieve_returns_raw_content() {
        let executor = MockExecutor::new().with_response(
            format!("{}/retrieve/TYPE-Natural/abc", BASE),
            MockExecutor::success_response(json!({ "content": "{\"identity\": 5}" })),
        );
        let store = store_with(executor, StoreProtocol::Meta);

        let raw = store.retrieve("TYPE-Natural/abc").await.unwrap();
        assert_eq!(raw.as_deref(), Some("{\"identity\": 5}"));
    }

    #[tokio::test]
    async fn retrieve_maps_404_to_none() {
        let store = store_with(MockExecutor::new(), StoreProtocol::Meta);
        assert!(store.retrieve("TYPE-Natural/missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn retrieve_rejects_relative_segments_without_a_request() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!({ "content": "{}" })));
        let store = store_with(executor.clone(), StoreProtocol::Meta);

        for path in ["../../admin/x", "TYPE-Natural/./a", "TYPE-Natural//a", ""] {
            assert!(store.retrieve(path).await.unwrap().is_none(), "{:?}", path);
        }

        assert!(executor.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn retrieve_maps_server_error_to_transport() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::error_response(500, "Internal Server Error"));
        let store = store_with(executor, StoreProtocol::Meta);

        let err = store.retrieve("TYPE-Natural/abc").await.unwrap_err();
        match err {
            ResourceError::Transport { message } => assert!(message.contains("500")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn retrieve_with_bad_envelope_is_malformed() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!({ "data": 1 })));
        let store = store_with(executor, StoreProtocol::Meta);

        let err = store.retrieve("TYPE-Natural/abc").await.unwrap_err();
        assert!(matches!(err, ResourceError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn retrieve_maps_executor_failure_to_transport() {
        let store = store_with(
            MockExecutor::new().fail_with("connection refused"),
            StoreProtocol::Meta,
        );

        let err = store.retrieve("TYPE-Natural/abc").await.unwrap_err();
        assert!(matches!(err, ResourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn store_with_meta_protocol() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::success_response(
            json!({ "storagePath": "TYPE-Natural/new", "timestamp": "2024-01-01T00:00:00Z" }),
        ));
        let store = store_with(executor.clone(), StoreProtocol::Meta);

        let receipt = store
            .store(&descriptor(), &ResourceContent::numeric(5))
            .await
            .unwrap();
        assert_eq!(receipt.path, "TYPE-Natural/new");
        assert_eq!(receipt.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, Method::POST);
        assert_eq!(recorded[0].url, format!("{}/store", BASE));

        let body = recorded[0].body.clone().unwrap();
        assert_eq!(body["meta"]["roleId"], "Sum");
        assert_eq!(body["content"], "{\n  \"identity\": 5\n}");
    }

    #[tokio::test]
    async fn store_with_resource_protocol_stamps_timestamp() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::success_response(
            json!({ "success": true, "path": "TYPE-Error/err" }),
        ));
        let store = store_with(executor.clone(), StoreProtocol::Resource);

        let content: ResourceContent =
            ErrorPayload::new("DivideByZero", "Cannot divide by zero").into();
        let receipt = store.store(&descriptor(), &content).await.unwrap();

        assert_eq!(receipt.path, "TYPE-Error/err");
        let sent = executor.recorded_requests()[0].body.clone().unwrap();
        assert_eq!(sent["resource"]["content"]["name"], "DivideByZero");
        assert_eq!(
            receipt.timestamp.as_deref(),
            sent["resource"]["timestamp"].as_str()
        );
    }

    #[tokio::test]
    async fn store_non_success_status_is_transport() {
        let executor =
            MockExecutor::new().with_default_response(MockExecutor::error_response(400, "Bad"));
        let store = store_with(executor, StoreProtocol::Meta);

        let err = store
            .store(&descriptor(), &ResourceContent::numeric(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn store_rejection_is_transport() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!({ "success": false })));
        let store = store_with(executor, StoreProtocol::Resource);

        let err = store
            .store(&descriptor(), &ResourceContent::numeric(5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("success: false"));
    }
}
