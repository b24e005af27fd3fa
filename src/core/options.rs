//! Raw client construction options.
//!
//! Every block is wrapped in `Option` so that "not supplied" and "supplied
//! but empty" remain distinguishable. The assembler relies on this: an
//! empty [`TlsConfig`] still conflicts with a [`StreamContext`] carrying an
//! `ssl` section.

use std::path::PathBuf;

use bytes::Bytes;

use crate::cluster::PeriodicChecksOption;
use crate::request::{IamConfig, ReadFrom, DEFAULT_CLUSTER_PORT, DEFAULT_HOST, DEFAULT_PORT};
use crate::telemetry::OpenTelemetryConfig;

/// Whether the client talks to a single server or a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientMode {
    /// A single server (optionally with replicas).
    #[default]
    Standalone,
    /// A sharded cluster.
    Cluster,
}

impl ClientMode {
    /// Returns `true` for [`ClientMode::Cluster`].
    pub fn is_cluster(self) -> bool {
        matches!(self, ClientMode::Cluster)
    }

    /// Port filled in for address entries without one.
    pub fn default_port(self) -> u16 {
        match self {
            ClientMode::Standalone => DEFAULT_PORT,
            ClientMode::Cluster => DEFAULT_CLUSTER_PORT,
        }
    }
}

/// One entry of the `addresses` option.
///
/// The host may carry a `tls://` or `ssl://` prefix, which requests TLS.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct AddressEntry {
    /// Host, `localhost` when absent.
    pub host: Option<String>,
    /// Port, the mode's default when absent.
    pub port: Option<u16>,
}

impl AddressEntry {
    /// Creates an entry with both host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
        }
    }

    pub(crate) fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub(crate) fn port_or(&self, default_port: u16) -> u16 {
        self.port.unwrap_or(default_port)
    }
}

/// The `credentials` option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct Credentials {
    /// ACL user name.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// IAM settings. Takes precedence over `password`.
    #[cfg_attr(feature = "json", serde(rename = "iamConfig", alias = "iam_config"))]
    pub iam_config: Option<IamConfig>,
}

impl Credentials {
    /// Password authentication, optionally with an ACL user.
    pub fn password(username: Option<String>, password: impl Into<String>) -> Self {
        Self {
            username,
            password: Some(password.into()),
            iam_config: None,
        }
    }

    /// IAM authentication for `username`.
    pub fn iam(username: impl Into<String>, config: IamConfig) -> Self {
        Self {
            username: Some(username.into()),
            password: None,
            iam_config: Some(config),
        }
    }
}

/// The `reconnect_strategy` option. All fields are passed through as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ReconnectStrategy {
    /// Number of retries.
    pub num_of_retries: Option<i64>,
    /// Delay multiplier.
    pub factor: Option<i64>,
    /// Exponential base.
    pub exponent_base: Option<i64>,
    /// Jitter percentage.
    pub jitter_percent: Option<i64>,
    /// Delay cap.
    pub max_delay: Option<i64>,
}

/// `advanced_config.tls_config`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct TlsConfig {
    /// Skip server certificate verification.
    pub use_insecure_tls: Option<bool>,
    /// CA certificate material (PEM or DER).
    pub root_certs: Option<Bytes>,
}

/// The `advanced_config` option.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct AdvancedConfig {
    /// Structured TLS settings.
    pub tls_config: Option<TlsConfig>,
    /// Connection establishment timeout in milliseconds.
    pub connection_timeout: Option<u32>,
    /// Socket timeout in milliseconds.
    pub socket_timeout: Option<u32>,
    /// Cluster only: refresh topology from the seed nodes instead of the
    /// currently known ones.
    pub refresh_topology_from_initial_nodes: Option<bool>,
    /// Telemetry settings, handed to the engine untouched.
    #[cfg_attr(feature = "json", serde(skip))]
    pub otel: Option<OpenTelemetryConfig>,
}

/// The `ssl` section of a legacy stream context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct SslContextOptions {
    /// `false` disables certificate verification.
    pub verify_peer: Option<bool>,
    /// Path to a CA bundle, read at assembly time.
    pub cafile: Option<PathBuf>,
}

/// Legacy, stream-context style TLS settings.
///
/// Only the `ssl` section is meaningful; a context without one is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct StreamContext {
    /// TLS options.
    pub ssl: Option<SslContextOptions>,
}

impl StreamContext {
    /// A context whose `ssl` section holds `options`.
    pub fn ssl(options: SslContextOptions) -> Self {
        Self { ssl: Some(options) }
    }
}

/// The `compression` option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct CompressionOptions {
    /// Turn compression on.
    pub enabled: Option<bool>,
    /// Algorithm; required when enabled.
    pub backend: Option<crate::request::CompressionBackend>,
    /// Overrides the backend's default level.
    pub compression_level: Option<i32>,
    /// Overrides the backend's default threshold.
    pub min_compression_size: Option<u32>,
}

/// Everything a client accepts at construction time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct ClientOptions {
    /// Seed addresses. Must not be empty.
    pub addresses: Vec<AddressEntry>,
    /// Explicit TLS request.
    pub use_tls: bool,
    /// Authentication.
    pub credentials: Option<Credentials>,
    /// Read routing.
    pub read_from: ReadFrom,
    /// Client availability zone.
    pub client_az: Option<String>,
    /// Request timeout in milliseconds.
    pub request_timeout: Option<u32>,
    /// Reconnect backoff.
    pub reconnect_strategy: Option<ReconnectStrategy>,
    /// Connection name.
    pub client_name: Option<String>,
    /// Cluster only.
    pub periodic_checks: Option<PeriodicChecksOption>,
    /// Logical database; must be non-negative.
    pub database_id: Option<i64>,
    /// Advanced settings.
    pub advanced_config: Option<AdvancedConfig>,
    /// Defer connecting until the first command.
    pub lazy_connect: Option<bool>,
    /// Legacy TLS settings.
    #[cfg_attr(feature = "json", serde(alias = "context"))]
    pub stream_context: Option<StreamContext>,
    /// Value compression.
    pub compression: Option<CompressionOptions>,
    /// In-flight request cap.
    pub inflight_requests_limit: Option<u32>,
}

impl ClientOptions {
    /// Reads options from a JSON object using the option key names.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            crate::Error::validation("options_json", format!("invalid client options: {}", e))
        })
    }

    pub(crate) fn tls_config(&self) -> Option<&TlsConfig> {
        self.advanced_config.as_ref()?.tls_config.as_ref()
    }

    pub(crate) fn ssl_options(&self) -> Option<&SslContextOptions> {
        self.stream_context.as_ref()?.ssl.as_ref()
    }

    pub(crate) fn otel(&self) -> Option<&OpenTelemetryConfig> {
        self.advanced_config.as_ref()?.otel.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_entry_defaults() {
        let entry = AddressEntry::default();
        assert_eq!(entry.host_or_default(), "localhost");
        assert_eq!(entry.port_or(6379), 6379);
        assert_eq!(entry.port_or(7001), 7001);

        let entry = AddressEntry::new("10.0.0.1", 7000);
        assert_eq!(entry.host_or_default(), "10.0.0.1");
        assert_eq!(entry.port_or(6379), 7000);
    }

    #[test]
    fn test_tls_config_lookup_tracks_presence() {
        let mut options = ClientOptions::default();
        assert!(options.tls_config().is_none());

        options.advanced_config = Some(AdvancedConfig::default());
        assert!(options.tls_config().is_none());

        options.advanced_config = Some(AdvancedConfig {
            tls_config: Some(TlsConfig::default()),
            ..Default::default()
        });
        assert!(options.tls_config().is_some());
    }

    #[test]
    fn test_ssl_options_requires_ssl_section() {
        let mut options = ClientOptions {
            stream_context: Some(StreamContext::default()),
            ..Default::default()
        };
        assert!(options.ssl_options().is_none());

        options.stream_context = Some(StreamContext::ssl(SslContextOptions::default()));
        assert!(options.ssl_options().is_some());
    }

    #[test]
    fn test_credentials_constructors() {
        let creds = Credentials::password(Some("user".to_string()), "pass");
        assert_eq!(creds.username.as_deref(), Some("user"));
        assert_eq!(creds.password.as_deref(), Some("pass"));
        assert!(creds.iam_config.is_none());

        let creds = Credentials::iam("user", IamConfig::default());
        assert!(creds.password.is_none());
        assert!(creds.iam_config.is_some());
    }

    #[test]
    fn test_client_mode() {
        assert!(ClientMode::Cluster.is_cluster());
        assert!(!ClientMode::Standalone.is_cluster());
        assert_eq!(ClientMode::default(), ClientMode::Standalone);
        assert_eq!(ClientMode::Standalone.default_port(), 6379);
        assert_eq!(ClientMode::Cluster.default_port(), 7001);
    }
}
