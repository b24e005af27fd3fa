//! # Connection request
//!
//! The canonical, engine-ready connection descriptor and its parts.
//!
//! A [`ConnectionRequest`] is produced once per connect call by the
//! assembler in [`crate::core::resolve`], is immutable afterwards, and is
//! moved into the engine's `open` call.
//!
//! ## Modules
//!
//! - [`error`] - Error types shared by the whole crate

use bytes::Bytes;

/// Error types.
pub mod error;

/// Port used when a standalone address entry omits one.
pub const DEFAULT_PORT: u16 = 6379;

/// Port used when a cluster address entry omits one.
pub const DEFAULT_CLUSTER_PORT: u16 = 7001;

/// Host used when an address entry omits one.
pub const DEFAULT_HOST: &str = "localhost";

/// A canonical server address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAddress {
    /// Host name or IP, with any scheme prefix removed.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl NodeAddress {
    /// Creates a new address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for NodeAddress {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl std::fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Transport security of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum TlsMode {
    /// Plaintext.
    #[default]
    NoTls,
    /// TLS with server certificate verification.
    SecureTls,
    /// TLS without server certificate verification.
    InsecureTls,
}

impl TlsMode {
    /// Returns `true` unless the mode is [`TlsMode::NoTls`].
    pub fn is_tls(self) -> bool {
        !matches!(self, TlsMode::NoTls)
    }
}

/// Read routing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum ReadFrom {
    /// Always read from the primary.
    #[default]
    Primary,
    /// Prefer replicas, fall back to the primary.
    PreferReplica,
    /// Prefer replicas in the client's availability zone.
    AzAffinity,
    /// Prefer replicas, then the primary, in the client's availability zone.
    AzAffinityReplicasAndPrimary,
}

impl ReadFrom {
    /// Maps the numeric option code (`0..=3`) to a strategy.
    ///
    /// Unknown codes fall back to [`ReadFrom::Primary`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ReadFrom::PreferReplica,
            2 => ReadFrom::AzAffinity,
            3 => ReadFrom::AzAffinityReplicasAndPrimary,
            _ => ReadFrom::Primary,
        }
    }

    /// Returns `true` for the availability-zone aware strategies.
    pub fn is_az_aware(self) -> bool {
        matches!(
            self,
            ReadFrom::AzAffinity | ReadFrom::AzAffinityReplicasAndPrimary
        )
    }
}

/// Managed service flavour used for IAM token generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceType {
    /// ElastiCache.
    #[default]
    #[cfg_attr(feature = "json", serde(rename = "elasticache", alias = "Elasticache"))]
    ElastiCache,
    /// MemoryDB.
    #[cfg_attr(feature = "json", serde(rename = "memorydb", alias = "MemoryDB"))]
    MemoryDb,
}

impl ServiceType {
    /// Parses a service name case-insensitively; anything but `MemoryDB`
    /// resolves to ElastiCache.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("memorydb") {
            ServiceType::MemoryDb
        } else {
            ServiceType::ElastiCache
        }
    }
}

/// IAM authentication settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct IamConfig {
    /// Cluster name the token is issued for.
    pub cluster_name: Option<String>,
    /// Cloud region.
    pub region: Option<String>,
    /// Managed service flavour.
    pub service: ServiceType,
    /// Token refresh interval. `None` lets the engine use its default (300s).
    pub refresh_interval_seconds: Option<u32>,
}

/// Credentials handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AuthenticationInfo {
    /// ACL user name.
    pub username: Option<String>,
    /// Password. Always `None` when `iam_config` is set.
    pub password: Option<String>,
    /// IAM settings, mutually exclusive with password auth.
    pub iam_config: Option<IamConfig>,
}

/// Reconnect backoff parameters, carried through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConnectionRetryStrategy {
    /// Number of retries before the backoff stops growing.
    pub number_of_retries: Option<i64>,
    /// Multiplier applied to each delay.
    pub factor: Option<i64>,
    /// Base of the exponential backoff.
    pub exponent_base: Option<i64>,
    /// Random jitter, as a percentage of the computed delay.
    pub jitter_percent: Option<i64>,
    /// Upper bound for a single delay.
    pub max_delay: Option<i64>,
}

/// Cluster topology health check configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum PeriodicChecks {
    /// No periodic checks.
    Disabled,
    /// Checks on a fixed interval. `None` selects the engine's default interval.
    ManualInterval {
        /// Interval in seconds.
        duration_in_sec: Option<u32>,
    },
}

/// Compression algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum CompressionBackend {
    /// Zstandard.
    #[default]
    Zstd,
    /// LZ4.
    Lz4,
}

impl CompressionBackend {
    /// Maps the numeric option code to a backend.
    pub fn from_code(code: i64) -> error::Result<Self> {
        match code {
            0 => Ok(CompressionBackend::Zstd),
            1 => Ok(CompressionBackend::Lz4),
            other => Err(error::Error::validation(
                "compression_backend",
                format!("Unknown compression backend: {}", other),
            )),
        }
    }

    /// Level used when none is given.
    pub fn default_level(self) -> i32 {
        match self {
            CompressionBackend::Zstd => 3,
            CompressionBackend::Lz4 => 0,
        }
    }

    /// Smallest payload compressed when no threshold is given.
    pub fn default_min_compression_size(self) -> u32 {
        256
    }
}

/// Resolved compression settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CompressionConfig {
    /// Whether values are compressed at all. When `false` the remaining
    /// fields carry no meaning.
    pub enabled: bool,
    /// Algorithm.
    pub backend: CompressionBackend,
    /// Backend-specific level, unvalidated.
    pub compression_level: i32,
    /// Payloads smaller than this are sent uncompressed.
    pub min_compression_size: u32,
}

/// The canonical connection descriptor consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ConnectionRequest {
    /// Seed addresses, in connection attempt order. Never empty.
    pub addresses: Vec<NodeAddress>,
    /// Cluster or standalone.
    pub cluster_mode_enabled: bool,
    /// Transport security.
    pub tls_mode: TlsMode,
    /// Zero or one CA certificate blobs.
    pub root_certs: Vec<Bytes>,
    /// Credentials.
    pub authentication_info: Option<AuthenticationInfo>,
    /// Read routing.
    pub read_from: ReadFrom,
    /// Availability zone of the client.
    pub client_az: Option<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout: Option<u32>,
    /// Reconnect backoff.
    pub connection_retry_strategy: Option<ConnectionRetryStrategy>,
    /// Name reported via `CLIENT SETNAME`.
    pub client_name: Option<String>,
    /// Topology checks. `Some` exactly in cluster mode.
    pub periodic_checks: Option<PeriodicChecks>,
    /// Logical database.
    pub database_id: u32,
    /// Value compression.
    pub compression_config: Option<CompressionConfig>,
    /// Defer connecting until the first command.
    pub lazy_connect: bool,
    /// Connection establishment timeout in milliseconds.
    pub connection_timeout: Option<u32>,
    /// Socket read/write timeout in milliseconds.
    pub socket_timeout: Option<u32>,
    /// Cluster only; always `false` in standalone mode.
    pub refresh_topology_from_initial_nodes: bool,
    /// Maximum number of in-flight requests.
    pub inflight_requests_limit: Option<u32>,
}

impl ConnectionRequest {
    /// Serializes the request as JSON for engines that take a text payload.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> error::Result<String> {
        serde_json::to_string(self).map_err(|e| error::Error::Validation {
            message: format!("failed to serialize connection request: {}", e),
        })
    }
}
