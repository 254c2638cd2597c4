use crate::codec::encode_record;
use crate::error::Result;
use crate::key::{AuditKey, KeySchema};
use crate::record::{AuditRecord, RequestSnapshot, ResponseSnapshot};
use crate::sink::AuditSink;
use hopgate_core::Slug;
use hopgate_flake::Flake;
use jiff::Timestamp;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Everything the recorder needs about one finished request.
#[derive(Debug, Clone)]
pub struct AuditInput {
    pub slug: Option<Slug>,
    pub request: RequestSnapshot,
    pub response: ResponseSnapshot,
}

/// Builds and persists audit records.
///
/// Without a sink the recorder is disabled and every call returns
/// immediately without doing any work.
///
/// ```rust
/// use std::sync::Arc;
/// use hopgate_audit::{AuditRecorder, KeySchema, StoreSink};
/// use hopgate_storage::InMemoryStore;
///
/// let recorder = AuditRecorder::builder()
///     .sink(Arc::new(StoreSink::new(InMemoryStore::new())))
///     .schema(KeySchema::Entries)
///     .build();
/// assert!(recorder.is_enabled());
/// assert!(!AuditRecorder::disabled().is_enabled());
/// ```
#[derive(Clone, TypedBuilder)]
pub struct AuditRecorder {
    #[builder(default, setter(strip_option))]
    sink: Option<Arc<dyn AuditSink>>,
    #[builder(default)]
    schema: KeySchema,
    #[builder(default = Arc::new(Flake::new()))]
    ids: Arc<Flake>,
}

impl AuditRecorder {
    /// A recorder with no audit destination.
    pub fn disabled() -> Self {
        Self::builder().build()
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn schema(&self) -> KeySchema {
        self.schema
    }

    /// Builds, encodes and writes the record for `input`.
    ///
    /// Returns the key written, or `None` when no sink is configured.
    pub async fn record(&self, input: AuditInput) -> Result<Option<AuditKey>> {
        let Some(sink) = &self.sink else {
            trace!("audit disabled, skipping record");
            return Ok(None);
        };

        let record = AuditRecord::build(
            input.slug,
            &input.request,
            &input.response,
            Timestamp::now(),
        );
        let payload = encode_record(&record)?;
        let id = self.ids.next_id()?;
        let key = AuditKey::new(self.schema, record.slug.as_ref(), &id);

        sink.write(&key, payload).await?;

        debug!(key = %key, status = record.response.status, "audit record written");
        Ok(Some(key))
    }

    /// [`record`](Self::record), with any failure logged and discarded.
    pub async fn record_or_log(&self, input: AuditInput) {
        let slug = input.slug.clone();
        if let Err(e) = self.record(input).await {
            warn!(
                slug = slug.as_ref().map(Slug::as_str).unwrap_or("-"),
                error = %e,
                "audit record dropped"
            );
        }
    }
}

impl std::fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("enabled", &self.is_enabled())
            .field("schema", &self.schema)
            .finish()
    }
}
