//! Resource Reader: fetch one materialized resource and decode its number.

use tracing::debug;

use cafs_resource::{AsyncResourceReader, Error, NumericPayload, ResourceDescriptor};

/// Reads numeric resources from a store.
///
/// Reading is a pure query and is never retried.
pub struct ResourceReader<R> {
    store: R,
}

impl<R: AsyncResourceReader> ResourceReader<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// Read the integer held by `descriptor`.
    ///
    /// Fails with `NotFound` when the address does not resolve,
    /// `MalformedPayload` when the content is not a NumericPayload, and
    /// `Transport` when the store call fails.
    pub async fn read_resource(&self, descriptor: &ResourceDescriptor) -> Result<i64, Error> {
        debug!(path = %descriptor.path, id = %descriptor.id, "reading resource");
        self.read_path(&descriptor.path).await
    }

    /// Read the integer stored at a bare address.
    pub async fn read_path(&self, path: &str) -> Result<i64, Error> {
        let raw = self
            .store
            .retrieve(path)
            .await?
            .ok_or_else(|| Error::not_found(path))?;

        NumericPayload::decode(path, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafs_resource::{CreationContext, InMemoryResourceStore};

    fn descriptor(path: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            id: "RES-1".to_string(),
            type_id: "TYPE-Natural".to_string(),
            path: path.to_string(),
            creation_context: CreationContext::new("AddendOne", "EXEC-1"),
        }
    }

    #[tokio::test]
    async fn reads_numeric_payload() {
        let store = InMemoryResourceStore::new();
        let path = store.insert_numeric("TYPE-Natural", 17);

        let reader = ResourceReader::new(&store);
        assert_eq!(reader.read_resource(&descriptor(&path)).await.unwrap(), 17);
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let store = InMemoryResourceStore::new();
        let reader = ResourceReader::new(&store);

        let err = reader
            .read_resource(&descriptor("TYPE-Natural/none"))
            .await
            .unwrap_err();
        match err {
            Error::NotFound { path } => assert_eq!(path, "TYPE-Natural/none"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_numeric_identity_is_malformed() {
        let store = InMemoryResourceStore::new();
        let path = store.insert_raw("TYPE-Natural", r#"{"identity": "five"}"#);
        let reader = ResourceReader::new(&store);

        let err = reader.read_resource(&descriptor(&path)).await.unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn error_payload_is_not_a_number() {
        let store = InMemoryResourceStore::new();
        let path = store.insert_raw(
            "TYPE-Error",
            r#"{"name": "DivideByZero", "description": "Cannot divide by zero"}"#,
        );
        let reader = ResourceReader::new(&store);

        let err = reader.read_resource(&descriptor(&path)).await.unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let store = InMemoryResourceStore::new();
        let path = store.insert_numeric("TYPE-Natural", 1);
        let store = store.fail_reads_of(path.clone());
        let reader = ResourceReader::new(&store);

        let err = reader.read_resource(&descriptor(&path)).await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
