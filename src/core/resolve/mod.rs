//! Option resolution.
//!
//! Each submodule resolves one concern as a pure function; [`assemble`]
//! runs them in a fixed order and combines the results into a
//! [`ConnectionRequest`]. The first failure aborts assembly.

mod address;
mod certs;
mod compression;
mod credentials;
mod database;
mod retry;
mod tls;

use crate::cluster;
use crate::core::options::{ClientMode, ClientOptions};
use crate::request::ConnectionRequest;
use crate::{Error, Result};

use self::address::resolve_addresses;
use self::certs::resolve_root_certs;
use self::compression::build_compression_config;
use self::credentials::extract_credentials;
use self::database::validate_database_id;
use self::retry::build_retry_strategy;
use self::tls::{check_tls_sources, resolve_tls_mode, TlsSignals};

/// Resolves `options` into a validated connection request.
///
/// The only side effect is reading a legacy `cafile`, if one is named.
/// Identical inputs yield identical requests (or identical errors).
///
/// # Errors
///
/// Returns [`Error::Validation`] for contradictory or malformed options and
/// [`Error::RootCertificate`] if a CA file cannot be read.
pub fn assemble(options: &ClientOptions, mode: ClientMode) -> Result<ConnectionRequest> {
    tracing::debug!(?mode, addresses = options.addresses.len(), "assembling connection request");

    if options.addresses.is_empty() {
        return Err(Error::validation(
            "addresses",
            "Addresses array cannot be empty",
        ));
    }
    let resolved = resolve_addresses(&options.addresses, mode.default_port());

    let authentication_info = extract_credentials(options.credentials.as_ref())?;

    check_tls_sources(options)?;
    let tls_mode = resolve_tls_mode(TlsSignals::collect(options, resolved.tls_implied))?;
    let root_certs = resolve_root_certs(options)?;

    let connection_retry_strategy = build_retry_strategy(options.reconnect_strategy.as_ref());
    let compression_config = build_compression_config(options.compression.as_ref())?;

    let cluster_mode_enabled = mode.is_cluster();
    let periodic_checks =
        cluster_mode_enabled.then(|| cluster::build_periodic_checks(options.periodic_checks));

    let database_id = validate_database_id(options.database_id)?;

    let advanced = options.advanced_config.as_ref();
    let request = ConnectionRequest {
        addresses: resolved.addresses,
        cluster_mode_enabled,
        tls_mode,
        root_certs,
        authentication_info,
        read_from: options.read_from,
        client_az: options.client_az.clone().filter(|az| !az.is_empty()),
        request_timeout: options.request_timeout,
        connection_retry_strategy,
        client_name: options.client_name.clone(),
        periodic_checks,
        database_id,
        compression_config,
        lazy_connect: options.lazy_connect.unwrap_or(false),
        connection_timeout: advanced.and_then(|a| a.connection_timeout),
        socket_timeout: advanced.and_then(|a| a.socket_timeout),
        refresh_topology_from_initial_nodes: cluster_mode_enabled
            && cluster::refresh_topology_from_initial_nodes(options),
        inflight_requests_limit: options.inflight_requests_limit,
    };

    tracing::debug!(
        tls_mode = ?request.tls_mode,
        cluster = request.cluster_mode_enabled,
        database_id = request.database_id,
        "connection request assembled"
    );
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::PeriodicChecksOption;
    use crate::core::options::{
        AddressEntry, AdvancedConfig, CompressionOptions, SslContextOptions, StreamContext,
        TlsConfig,
    };
    use crate::request::{CompressionBackend, NodeAddress, PeriodicChecks, ReadFrom, TlsMode};

    fn options() -> ClientOptions {
        ClientOptions {
            addresses: vec![AddressEntry::new("localhost", 8080)],
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_standalone() {
        let request = assemble(&options(), ClientMode::Standalone).unwrap();
        assert_eq!(request.addresses, vec![NodeAddress::new("localhost", 8080)]);
        assert!(!request.cluster_mode_enabled);
        assert_eq!(request.tls_mode, TlsMode::NoTls);
        assert!(request.root_certs.is_empty());
        assert_eq!(request.authentication_info, None);
        assert_eq!(request.read_from, ReadFrom::Primary);
        assert_eq!(request.periodic_checks, None);
        assert_eq!(request.database_id, 0);
        assert!(!request.lazy_connect);
        assert!(!request.refresh_topology_from_initial_nodes);
        assert_eq!(request.compression_config, None);
        assert_eq!(request.connection_timeout, None);
    }

    #[test]
    fn test_minimal_cluster() {
        let request = assemble(&options(), ClientMode::Cluster).unwrap();
        assert!(request.cluster_mode_enabled);
        assert_eq!(
            request.periodic_checks,
            Some(PeriodicChecks::ManualInterval {
                duration_in_sec: None
            })
        );
    }

    #[test]
    fn test_empty_addresses_rejected() {
        let err = assemble(&ClientOptions::default(), ClientMode::Standalone).unwrap_err();
        assert_eq!(err.to_string(), "Addresses array cannot be empty");
    }

    #[test]
    fn test_standalone_ignores_cluster_fields() {
        let options = ClientOptions {
            periodic_checks: Some(PeriodicChecksOption::Disabled),
            advanced_config: Some(AdvancedConfig {
                refresh_topology_from_initial_nodes: Some(true),
                ..Default::default()
            }),
            ..options()
        };
        let request = assemble(&options, ClientMode::Standalone).unwrap();
        assert_eq!(request.periodic_checks, None);
        assert!(!request.refresh_topology_from_initial_nodes);

        let request = assemble(&options, ClientMode::Cluster).unwrap();
        assert_eq!(request.periodic_checks, Some(PeriodicChecks::Disabled));
        assert!(request.refresh_topology_from_initial_nodes);
    }

    #[test]
    fn test_client_az_empty_collapses() {
        let options = ClientOptions {
            client_az: Some(String::new()),
            ..options()
        };
        assert_eq!(assemble(&options, ClientMode::Standalone).unwrap().client_az, None);
    }

    #[test]
    fn test_advanced_timeouts() {
        let options = ClientOptions {
            advanced_config: Some(AdvancedConfig {
                connection_timeout: Some(999),
                socket_timeout: Some(1500),
                ..Default::default()
            }),
            ..options()
        };
        let request = assemble(&options, ClientMode::Standalone).unwrap();
        assert_eq!(request.connection_timeout, Some(999));
        assert_eq!(request.socket_timeout, Some(1500));
    }

    #[test]
    fn test_conflict_checked_before_tls_mode() {
        let options = ClientOptions {
            advanced_config: Some(AdvancedConfig {
                tls_config: Some(TlsConfig {
                    use_insecure_tls: Some(true),
                    root_certs: None,
                }),
                ..Default::default()
            }),
            stream_context: Some(StreamContext::ssl(SslContextOptions::default())),
            ..options()
        };
        let err = assemble(&options, ClientMode::Standalone).unwrap_err();
        assert_eq!(err.to_string(), tls::TLS_SOURCE_CONFLICT);
    }

    #[test]
    fn test_first_error_wins() {
        let options = ClientOptions {
            compression: Some(CompressionOptions {
                enabled: Some(true),
                ..Default::default()
            }),
            database_id: Some(-1),
            ..options()
        };
        let err = assemble(&options, ClientMode::Cluster).unwrap_err();
        assert!(err.to_string().starts_with("Compression backend"));
    }

    #[test]
    fn test_idempotent() {
        let options = ClientOptions {
            addresses: vec![
                AddressEntry::new("tls://a", 1),
                AddressEntry::new("b", 2),
            ],
            compression: Some(CompressionOptions {
                enabled: Some(true),
                backend: Some(CompressionBackend::Lz4),
                ..Default::default()
            }),
            database_id: Some(3),
            ..Default::default()
        };
        let first = assemble(&options, ClientMode::Cluster).unwrap();
        let second = assemble(&options, ClientMode::Cluster).unwrap();
        assert_eq!(first, second);
    }
}
