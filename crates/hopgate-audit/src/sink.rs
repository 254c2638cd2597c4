use crate::error::{AuditError, Result};
use crate::key::AuditKey;
use crate::sanitizer::{ACCESS_CLIENT_ID_HEADER, ACCESS_CLIENT_SECRET_HEADER};
use async_trait::async_trait;
use hopgate_core::KvStore;
use serde::Serialize;
use std::fmt;
use tracing::trace;
use url::Url;

/// Destination for encoded audit records.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Persists one encoded record under `key`.
    async fn write(&self, key: &AuditKey, payload: String) -> Result<()>;
}

/// Writes audit records into a key-value store.
///
/// The store may be the mapping store itself or a dedicated log store.
#[derive(Debug, Clone)]
pub struct StoreSink<S> {
    store: S,
}

impl<S: KvStore> StoreSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: KvStore> AuditSink for StoreSink<S> {
    async fn write(&self, key: &AuditKey, payload: String) -> Result<()> {
        trace!(key = %key, "writing audit record to store");
        self.store.put(key.as_str(), payload).await?;
        Ok(())
    }
}

/// Access credentials presented to the external log collector.
#[derive(Clone)]
pub struct CollectorCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for CollectorCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct CollectorEntry<'a> {
    key: &'a str,
    payload: String,
}

/// Ships audit records to an external HTTP collector.
///
/// Each record is POSTed as `{"key": ..., "payload": ...}`. Any non-2xx
/// answer counts as a failed write.
#[derive(Debug, Clone)]
pub struct CollectorSink {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Option<CollectorCredentials>,
}

impl CollectorSink {
    pub fn new(endpoint: Url, credentials: Option<CollectorCredentials>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, credentials)
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: Url,
        credentials: Option<CollectorCredentials>,
    ) -> Self {
        Self {
            client,
            endpoint,
            credentials,
        }
    }
}

#[async_trait]
impl AuditSink for CollectorSink {
    async fn write(&self, key: &AuditKey, payload: String) -> Result<()> {
        trace!(key = %key, endpoint = %self.endpoint, "sending audit record to collector");

        let mut request = self.client.post(self.endpoint.clone()).json(&CollectorEntry {
            key: key.as_str(),
            payload,
        });
        if let Some(credentials) = &self.credentials {
            request = request
                .header(ACCESS_CLIENT_ID_HEADER, credentials.client_id.as_str())
                .header(ACCESS_CLIENT_SECRET_HEADER, credentials.client_secret.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuditError::Collector(e.to_string()))?;
        response
            .error_for_status()
            .map_err(|e| AuditError::Collector(e.to_string()))?;
        Ok(())
    }
}
