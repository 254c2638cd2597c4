use clap::{Parser, ValueEnum};
use hopgate_audit::KeySchema;
use hopgate_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use url::Url;

pub const LISTEN_ADDR_ENV: &str = "HOPGATE_LISTEN_ADDR";
pub const FALLBACK_URL_ENV: &str = "HOPGATE_FALLBACK_URL";
pub const STORE_BACKEND_ENV: &str = "HOPGATE_STORE_BACKEND";
pub const REDIS_URL_ENV: &str = "HOPGATE_REDIS_URL";
pub const SEED_MAPPINGS_ENV: &str = "HOPGATE_SEED_MAPPINGS";
pub const AUDIT_SINK_ENV: &str = "HOPGATE_AUDIT_SINK";
pub const AUDIT_REDIS_URL_ENV: &str = "HOPGATE_AUDIT_REDIS_URL";
pub const AUDIT_KEY_SCHEMA_ENV: &str = "HOPGATE_AUDIT_KEY_SCHEMA";
pub const LOG_ENDPOINT_ENV: &str = "HOPGATE_LOG_ENDPOINT";
pub const LOG_CLIENT_ID_ENV: &str = "HOPGATE_LOG_CLIENT_ID";
pub const LOG_CLIENT_SECRET_ENV: &str = "HOPGATE_LOG_CLIENT_SECRET";
pub const LOG_FORMAT_ENV: &str = "HOPGATE_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StoreBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackendArg::InMemory => write!(f, "in-memory"),
            StoreBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuditSinkArg {
    #[value(name = "none")]
    None,
    #[value(name = "store")]
    Store,
    #[value(name = "collector")]
    Collector,
}

impl Display for AuditSinkArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditSinkArg::None => write!(f, "none"),
            AuditSinkArg::Store => write!(f, "store"),
            AuditSinkArg::Collector => write!(f, "collector"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeySchemaArg {
    #[value(name = "entries")]
    Entries,
    #[value(name = "legacy")]
    Legacy,
}

impl From<KeySchemaArg> for KeySchema {
    fn from(arg: KeySchemaArg) -> Self {
        match arg {
            KeySchemaArg::Entries => KeySchema::Entries,
            KeySchemaArg::Legacy => KeySchema::Legacy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hopgate-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Destination for requests that cannot be resolved.
    #[arg(long, env = FALLBACK_URL_ENV)]
    pub fallback_url: Option<String>,

    #[arg(
        long,
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackendArg::InMemory
    )]
    pub store: StoreBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("store", "redis"))]
    pub redis_url: Option<String>,

    /// `slug=url` pairs loaded into the in-memory store at startup.
    #[arg(long = "seed", env = SEED_MAPPINGS_ENV, value_delimiter = ',')]
    pub seed_mappings: Vec<String>,

    #[arg(
        long,
        env = AUDIT_SINK_ENV,
        value_enum,
        default_value_t = AuditSinkArg::None
    )]
    pub audit_sink: AuditSinkArg,

    /// Dedicated log store; the mapping store is used when unset.
    #[arg(long, env = AUDIT_REDIS_URL_ENV)]
    pub audit_redis_url: Option<String>,

    #[arg(
        long,
        env = AUDIT_KEY_SCHEMA_ENV,
        value_enum,
        default_value_t = KeySchemaArg::Entries
    )]
    pub audit_key_schema: KeySchemaArg,

    #[arg(long, env = LOG_ENDPOINT_ENV, required_if_eq("audit_sink", "collector"))]
    pub log_endpoint: Option<Url>,

    #[arg(long, env = LOG_CLIENT_ID_ENV, requires = "log_client_secret")]
    pub log_client_id: Option<String>,

    #[arg(long, env = LOG_CLIENT_SECRET_ENV, requires = "log_client_id")]
    pub log_client_secret: Option<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,
}
