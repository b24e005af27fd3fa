//! # Connreq
//!
//! Connection-option resolution for Valkey/Redis-compatible clients.
//!
//! Takes loosely structured client options (seed addresses, credentials,
//! TLS settings from up to three sources, retry and compression settings)
//! and produces a single validated [`ConnectionRequest`] for an external
//! connection engine. Contradictory or malformed options are rejected with
//! a precise message before any connection attempt.
//!
//! ## Features
//!
//! - `json` - Read options from JSON and serialize requests
//! - `test-utils` - Recording engine for tests
//!
//! ## Example
//!
//! ```
//! use connreq::{assemble, AddressEntry, ClientMode, ClientOptions, TlsMode};
//!
//! let options = ClientOptions {
//!     addresses: vec![AddressEntry::new("tls://cache.internal", 6380)],
//!     ..Default::default()
//! };
//! let request = assemble(&options, ClientMode::Standalone)?;
//! assert_eq!(request.tls_mode, TlsMode::SecureTls);
//! assert_eq!(request.addresses[0].host, "cache.internal");
//! # Ok::<(), connreq::Error>(())
//! ```

#![warn(missing_docs)]

pub(crate) mod cluster;
pub(crate) mod core;
pub(crate) mod request;

pub mod telemetry;

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "test-utils"))] {
        pub mod testing;
    }
}

// Re-export the public surface for convenience
pub use crate::cluster::{
    PeriodicChecksOption, PERIODIC_CHECK_DISABLED, PERIODIC_CHECK_ENABLED_DEFAULT_CONFIGS,
};
pub use crate::core::builder::ClientBuilder;
pub use crate::core::engine::ConnectionEngine;
pub use crate::core::options::{
    AddressEntry, AdvancedConfig, ClientMode, ClientOptions, CompressionOptions, Credentials,
    ReconnectStrategy, SslContextOptions, StreamContext, TlsConfig,
};
pub use crate::core::resolve::assemble;
pub use crate::core::{Client, Error, Result};
pub use crate::request::{
    AuthenticationInfo, CompressionBackend, CompressionConfig, ConnectionRequest,
    ConnectionRetryStrategy, IamConfig, NodeAddress, PeriodicChecks, ReadFrom, ServiceType,
    TlsMode, DEFAULT_CLUSTER_PORT, DEFAULT_HOST, DEFAULT_PORT,
};
