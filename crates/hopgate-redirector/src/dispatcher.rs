use crate::config::RedirectConfig;
use crate::error::Result;
use crate::fallback::{redirect, FallbackPolicy};
use crate::request::InboundRequest;
use crate::resolver::{Resolution, Resolver};
use crate::spawner::{Spawner, TokioSpawner};
use hopgate_audit::{AuditInput, AuditRecorder, ResponseSnapshot};
use hopgate_core::{KvStore, Slug, SlugCheck};
use http::Response;
use tracing::{debug, trace};

/// Turns inbound requests into redirect responses and schedules their audit.
///
/// The response never depends on the audit outcome: auditing runs on the
/// [`Spawner`] after the response has been chosen.
#[derive(Debug)]
pub struct Dispatcher<S, P = TokioSpawner> {
    resolver: Resolver<S>,
    fallback: FallbackPolicy,
    recorder: AuditRecorder,
    spawner: P,
}

impl<S: KvStore, P: Spawner> Dispatcher<S, P> {
    /// Creates a dispatcher. Fails only when the configured fallback url is
    /// unusable; a missing fallback is allowed.
    pub fn new(
        store: S,
        config: RedirectConfig,
        recorder: AuditRecorder,
        spawner: P,
    ) -> Result<Self> {
        Ok(Self {
            resolver: Resolver::new(store),
            fallback: FallbackPolicy::from_config(&config)?,
            recorder,
            spawner,
        })
    }

    pub fn recorder(&self) -> &AuditRecorder {
        &self.recorder
    }

    pub fn spawner(&self) -> &P {
        &self.spawner
    }

    /// Handles one request end to end.
    pub async fn dispatch(&self, request: InboundRequest) -> Response<String> {
        let (slug, response) = match Slug::check(request.slug_segment()) {
            SlugCheck::Valid(slug) => {
                let response = match self.resolver.resolve(&slug).await {
                    Resolution::Hit(destination) => redirect(&destination),
                    Resolution::Miss => {
                        debug!(slug = %slug, "no mapping, falling back");
                        self.fallback.respond()
                    }
                    Resolution::DecodeError(e) => {
                        debug!(slug = %slug, error = %e, "undecodable mapping, falling back");
                        self.fallback.respond()
                    }
                };
                (Some(slug), response)
            }
            SlugCheck::Invalid(e) => {
                debug!(error = %e, "invalid slug, falling back");
                (None, self.fallback.respond())
            }
            SlugCheck::Empty => {
                trace!("empty path, falling back");
                (None, self.fallback.respond())
            }
        };

        trace!(status = %response.status(), "response chosen");
        self.schedule_audit(slug, request, &response);
        response
    }

    fn schedule_audit(
        &self,
        slug: Option<Slug>,
        request: InboundRequest,
        response: &Response<String>,
    ) {
        if !self.recorder.is_enabled() {
            return;
        }

        let input = AuditInput {
            slug,
            request: request.into_snapshot(),
            response: ResponseSnapshot {
                status: response.status(),
                headers: response.headers().clone(),
            },
        };
        let recorder = self.recorder.clone();
        self.spawner.spawn_background(Box::pin(async move {
            recorder.record_or_log(input).await;
        }));
    }
}
