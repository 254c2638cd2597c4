//! HTTP front end for the hopgate redirector.
//!
//! Every request that is not a gateway route is handed to the
//! [`Dispatcher`](hopgate_redirector::Dispatcher) as-is; the gateway adds
//! transport details (peer address, absolute url) and nothing else.

pub mod app;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod state;

pub use app::App;
pub use cli::Cli;
pub use config::{AuditConfig, AuditSinkConfig, ConfigError};
pub use state::{AppState, SharedStore};
