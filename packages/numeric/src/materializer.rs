//! Resource Materializer: commit content for an output descriptor.

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use cafs_resource::{
    AsyncResourceWriter, Error, MaterializedResource, PotentialOutputDescriptor, ResourceContent,
};

/// Commits output content to a store.
///
/// Every call creates a new store entry. Committing the same descriptor
/// twice yields two entries, and callers must not assume both share an
/// address.
pub struct ResourceMaterializer<W> {
    store: W,
}

impl<W: AsyncResourceWriter> ResourceMaterializer<W> {
    pub fn new(store: W) -> Self {
        Self { store }
    }

    pub async fn materialize(
        &self,
        descriptor: &PotentialOutputDescriptor,
        content: &ResourceContent,
    ) -> Result<MaterializedResource, Error> {
        let receipt = self.store.store(descriptor, content).await?;

        let timestamp = receipt.timestamp.unwrap_or_else(now_timestamp);

        debug!(
            id = %descriptor.id,
            role_id = %descriptor.creation_context.role_id,
            path = %receipt.path,
            error = content.is_error(),
            "materialized resource"
        );

        Ok(descriptor
            .clone()
            .into_materialized(receipt.path, timestamp, receipt.content_hash))
    }
}

/// Current UTC time in the `2024-01-01T00:00:00.000Z` form.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafs_resource::{
        AsyncResourceReader, CreationContext, ErrorPayload, InMemoryResourceStore, NumericPayload,
    };

    fn descriptor() -> PotentialOutputDescriptor {
        PotentialOutputDescriptor::new(
            "RES-Sum",
            "TYPE-Natural",
            CreationContext::new("Sum", "EXEC-1"),
        )
    }

    #[tokio::test]
    async fn materialized_numeric_reads_back() {
        let store = InMemoryResourceStore::new();
        let materializer = ResourceMaterializer::new(&store);

        let resource = materializer
            .materialize(&descriptor(), &ResourceContent::numeric(5))
            .await
            .unwrap();

        assert_eq!(resource.id, "RES-Sum");
        assert_eq!(resource.creation_context.role_id, "Sum");
        assert!(resource.path.starts_with("TYPE-Natural/"));

        let raw = store.retrieve(&resource.path).await.unwrap().unwrap();
        assert_eq!(NumericPayload::decode(&resource.path, &raw).unwrap(), 5);
    }

    #[tokio::test]
    async fn timestamp_is_filled_when_store_omits_it() {
        let store = InMemoryResourceStore::new();
        let materializer = ResourceMaterializer::new(&store);

        let resource = materializer
            .materialize(&descriptor(), &ResourceContent::numeric(1))
            .await
            .unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(&resource.timestamp).is_ok());
        assert!(resource.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn error_payload_is_committed_like_a_value() {
        let store = InMemoryResourceStore::new();
        let materializer = ResourceMaterializer::new(&store);
        let content: ResourceContent = ErrorPayload::new("DivideByZero", "Cannot divide by zero")
            .with_details(serde_json::json!({ "dividend": 5, "divisor": 0 }))
            .into();

        materializer
            .materialize(&descriptor(), &content)
            .await
            .unwrap();

        let writes = store.recorded_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].content, content);
    }

    #[tokio::test]
    async fn repeated_materialization_creates_new_entries() {
        let store = InMemoryResourceStore::new();
        let materializer = ResourceMaterializer::new(&store);
        let content = ResourceContent::numeric(5);

        let first = materializer.materialize(&descriptor(), &content).await.unwrap();
        let second = materializer.materialize(&descriptor(), &content).await.unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(store.recorded_writes().len(), 2);
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let store = InMemoryResourceStore::new().fail_writes_after(0);
        let materializer = ResourceMaterializer::new(&store);

        let err = materializer
            .materialize(&descriptor(), &ResourceContent::numeric(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
