//! Validated startup configuration, derived from the command line.

use crate::cli::{AuditSinkArg, Cli, StoreBackendArg};
use crate::state::SharedStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hopgate_audit::{AuditRecorder, CollectorCredentials, CollectorSink, KeySchema, StoreSink};
use hopgate_core::{KvStore, Slug, SlugError, StorageError};
use hopgate_redirector::RedirectConfig;
use hopgate_storage::{InMemoryStore, RedisStore};
use std::sync::Arc;
use thiserror::Error;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a redis url is required when the store backend is redis")]
    MissingRedisUrl,
    #[error("a log endpoint is required when the audit sink is collector")]
    MissingLogEndpoint,
    #[error("log client id and secret must be set together")]
    PartialCredentials,
    #[error("seed mapping `{0}` is not of the form slug=url")]
    MalformedSeed(String),
    #[error("seed mapping has an invalid slug: {0}")]
    InvalidSeedSlug(#[from] SlugError),
    #[error("seed mappings only apply to the in-memory store")]
    SeedWithRedis,
}

/// Where audit records go.
#[derive(Debug, Clone, Default)]
pub enum AuditSinkConfig {
    #[default]
    Disabled,
    /// Into a store: a dedicated redis when a url is given, the mapping
    /// store otherwise.
    Store { redis_url: Option<String> },
    Collector {
        endpoint: Url,
        credentials: Option<CollectorCredentials>,
    },
}

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct AuditConfig {
    #[builder(default)]
    pub sink: AuditSinkConfig,
    #[builder(default)]
    pub schema: KeySchema,
}

impl AuditConfig {
    /// Builds the recorder, connecting to a dedicated log store if one is
    /// configured.
    pub async fn into_recorder(
        self,
        mapping_store: &SharedStore,
    ) -> Result<AuditRecorder, StorageError> {
        let builder = AuditRecorder::builder().schema(self.schema);
        let recorder = match self.sink {
            AuditSinkConfig::Disabled => AuditRecorder::disabled(),
            AuditSinkConfig::Store { redis_url: None } => builder
                .sink(Arc::new(StoreSink::new(mapping_store.clone())))
                .build(),
            AuditSinkConfig::Store {
                redis_url: Some(url),
            } => {
                let store = RedisStore::connect(&url).await?;
                builder.sink(Arc::new(StoreSink::new(store))).build()
            }
            AuditSinkConfig::Collector {
                endpoint,
                credentials,
            } => builder
                .sink(Arc::new(CollectorSink::new(endpoint, credentials)))
                .build(),
        };
        Ok(recorder)
    }
}

impl Cli {
    /// A blank fallback url counts as not configured.
    pub fn redirect_config(&self) -> RedirectConfig {
        RedirectConfig {
            fallback_url: self
                .fallback_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn audit_config(&self) -> Result<AuditConfig, ConfigError> {
        let credentials = match (&self.log_client_id, &self.log_client_secret) {
            (Some(client_id), Some(client_secret)) => Some(CollectorCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        let sink = match self.audit_sink {
            AuditSinkArg::None => AuditSinkConfig::Disabled,
            AuditSinkArg::Store => AuditSinkConfig::Store {
                redis_url: self.audit_redis_url.clone(),
            },
            AuditSinkArg::Collector => AuditSinkConfig::Collector {
                endpoint: self
                    .log_endpoint
                    .clone()
                    .ok_or(ConfigError::MissingLogEndpoint)?,
                credentials,
            },
        };

        Ok(AuditConfig::builder()
            .sink(sink)
            .schema(self.audit_key_schema.into())
            .build())
    }

    /// Parses `slug=url` pairs into stored mapping entries.
    pub fn seed_entries(&self) -> Result<Vec<(Slug, String)>, ConfigError> {
        if self.store == StoreBackendArg::Redis && !self.seed_mappings.is_empty() {
            return Err(ConfigError::SeedWithRedis);
        }

        self.seed_mappings
            .iter()
            .map(|pair| -> Result<_, ConfigError> {
                let (slug, url) = pair
                    .split_once('=')
                    .ok_or_else(|| ConfigError::MalformedSeed(pair.clone()))?;
                Ok((Slug::new(slug.trim())?, STANDARD.encode(url.trim())))
            })
            .collect()
    }
}

/// Builds the in-memory mapping store, preloaded with the seed entries.
pub async fn seeded_store(entries: Vec<(Slug, String)>) -> Result<InMemoryStore, StorageError> {
    let store = InMemoryStore::with_capacity(entries.len());
    for (slug, encoded) in entries {
        store.put(slug.as_str(), encoded).await?;
    }
    Ok(store)
}
