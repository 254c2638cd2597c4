//! Slug resolution, fallback and per-request orchestration.
//!
//! A [`Dispatcher`] turns an [`InboundRequest`] into a redirect response:
//!
//! 1. the slug is taken from the request path and validated;
//! 2. a valid slug is looked up once through the [`Resolver`];
//! 3. a hit redirects to the decoded destination, anything else goes through
//!    the [`FallbackPolicy`];
//! 4. the audit record is handed to a [`Spawner`] and the response is
//!    returned without waiting for it.
//!
//! # Example
//!
//! ```rust
//! use base64::Engine as _;
//! use hopgate_audit::AuditRecorder;
//! use hopgate_redirector::{Dispatcher, InboundRequest, RedirectConfig, TokioSpawner};
//! use hopgate_storage::InMemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let encoded = base64::engine::general_purpose::STANDARD.encode("https://example.com/page");
//! let store: InMemoryStore = [("abc123", encoded)].into_iter().collect();
//!
//! let config = RedirectConfig::builder()
//!     .fallback_url("https://home.example")
//!     .build();
//! let dispatcher = Dispatcher::new(store, config, AuditRecorder::disabled(), TokioSpawner::new())?;
//!
//! let response = dispatcher
//!     .dispatch(InboundRequest::get("/abc123".parse()?))
//!     .await;
//! assert_eq!(response.status(), 302);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod destination;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod request;
pub mod resolver;
pub mod spawner;

pub use config::RedirectConfig;
pub use destination::Destination;
pub use dispatcher::Dispatcher;
pub use error::{DestinationError, RedirectorError, Result};
pub use fallback::{FallbackPolicy, MISSING_FALLBACK_MESSAGE};
pub use request::InboundRequest;
pub use resolver::{Resolution, Resolver};
pub use spawner::{BackgroundTask, Spawner, TokioSpawner};
