//! Seed address normalization.

use crate::core::options::AddressEntry;
use crate::request::NodeAddress;

/// Host prefixes that request TLS.
const TLS_SCHEME_PREFIXES: [&str; 2] = ["tls://", "ssl://"];

/// Canonical addresses plus whether any entry asked for TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedAddresses {
    pub(crate) addresses: Vec<NodeAddress>,
    pub(crate) tls_implied: bool,
}

/// Strips a `tls://` or `ssl://` prefix, reporting whether one was present.
fn strip_tls_scheme(host: &str) -> (&str, bool) {
    TLS_SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .map_or((host, false), |stripped| (stripped, true))
}

/// Normalizes address entries, preserving their order. Entries without a
/// port get `default_port`.
pub(crate) fn resolve_addresses(
    entries: &[AddressEntry],
    default_port: u16,
) -> ResolvedAddresses {
    let mut tls_implied = false;
    let addresses = entries
        .iter()
        .map(|entry| {
            let (host, implied) = strip_tls_scheme(entry.host_or_default());
            tls_implied |= implied;
            NodeAddress::new(host, entry.port_or(default_port))
        })
        .collect();

    ResolvedAddresses {
        addresses,
        tls_implied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORT: u16 = 6379;

    #[test]
    fn test_plain_addresses_preserve_order() {
        let resolved = resolve_addresses(
            &[
                AddressEntry::new("localhost", 8080),
                AddressEntry::new("172.0.1.24", 9000),
            ],
            PORT,
        );
        assert_eq!(
            resolved.addresses,
            vec![
                NodeAddress::new("localhost", 8080),
                NodeAddress::new("172.0.1.24", 9000)
            ]
        );
        assert!(!resolved.tls_implied);
    }

    #[test]
    fn test_tls_prefix_stripped() {
        let resolved = resolve_addresses(&[AddressEntry::new("tls://localhost", 6379)], PORT);
        assert_eq!(resolved.addresses[0].host, "localhost");
        assert!(resolved.tls_implied);
    }

    #[test]
    fn test_ssl_prefix_stripped() {
        let resolved = resolve_addresses(&[AddressEntry::new("ssl://cache.internal", 6380)], PORT);
        assert_eq!(resolved.addresses[0], NodeAddress::new("cache.internal", 6380));
        assert!(resolved.tls_implied);
    }

    #[test]
    fn test_single_prefixed_entry_marks_whole_list() {
        let resolved = resolve_addresses(
            &[
                AddressEntry::new("a", 1),
                AddressEntry::new("tls://b", 2),
                AddressEntry::new("c", 3),
            ],
            PORT,
        );
        assert!(resolved.tls_implied);
        let hosts: Vec<_> = resolved.addresses.iter().map(|a| a.host.as_str()).collect();
        assert_eq!(hosts, ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_host_and_port_use_defaults() {
        let entry = AddressEntry {
            host: Some("tls://example.com".to_string()),
            port: None,
        };
        let resolved = resolve_addresses(&[entry], PORT);
        assert_eq!(resolved.addresses[0], NodeAddress::new("example.com", 6379));

        let resolved = resolve_addresses(&[AddressEntry::default()], PORT);
        assert_eq!(resolved.addresses[0], NodeAddress::default());
    }

    #[test]
    fn test_missing_port_uses_given_default() {
        let entries = [
            AddressEntry {
                host: Some("node".to_string()),
                port: None,
            },
            AddressEntry::new("other", 7005),
        ];
        let resolved = resolve_addresses(&entries, 7001);
        assert_eq!(
            resolved.addresses,
            vec![NodeAddress::new("node", 7001), NodeAddress::new("other", 7005)]
        );
    }

    #[test]
    fn test_prefix_only_matches_at_start() {
        let resolved = resolve_addresses(&[AddressEntry::new("host.tls://x", 1)], PORT);
        assert_eq!(resolved.addresses[0].host, "host.tls://x");
        assert!(!resolved.tls_implied);
    }

    #[test]
    fn test_empty_input() {
        let resolved = resolve_addresses(&[], PORT);
        assert!(resolved.addresses.is_empty());
        assert!(!resolved.tls_implied);
    }
}
