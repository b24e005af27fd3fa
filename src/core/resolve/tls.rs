//! TLS mode precedence.
//!
//! TLS can be asked for by the `use_tls` flag, a `tls://` / `ssl://` address
//! prefix or a legacy `ssl` context section. Verification can be turned off
//! by `use_insecure_tls` or by `verify_peer = false`; the explicit flag wins.

use crate::core::options::ClientOptions;
use crate::request::TlsMode;
use crate::{Error, Result};

pub(crate) const TLS_SOURCE_CONFLICT: &str =
    "At most one of stream context or advanced TLS config can be specified.";

pub(crate) const INSECURE_TLS_WITHOUT_TLS: &str =
    "Cannot configure insecure TLS when TLS is disabled.";

/// Every TLS-relevant fact, normalized from the option surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TlsSignals {
    /// TLS asked for by the flag, an address scheme, or a legacy `ssl` section.
    pub(crate) requested: bool,
    /// `advanced_config.tls_config.use_insecure_tls`, when given.
    pub(crate) insecure_override: Option<bool>,
    /// Legacy context set `verify_peer = false`.
    pub(crate) legacy_skip_verify: bool,
}

impl TlsSignals {
    pub(crate) fn collect(options: &ClientOptions, tls_implied_by_address: bool) -> Self {
        let ssl = options.ssl_options();
        Self {
            requested: options.use_tls || tls_implied_by_address || ssl.is_some(),
            insecure_override: options.tls_config().and_then(|tls| tls.use_insecure_tls),
            legacy_skip_verify: ssl.is_some_and(|ssl| ssl.verify_peer == Some(false)),
        }
    }
}

/// Rejects options that carry both a legacy `ssl` section and an
/// advanced TLS config. Presence alone counts, even for an empty config.
pub(crate) fn check_tls_sources(options: &ClientOptions) -> Result<()> {
    if options.ssl_options().is_some() && options.tls_config().is_some() {
        return Err(Error::validation("tls_config_conflict", TLS_SOURCE_CONFLICT));
    }
    Ok(())
}

/// Picks the TLS mode. An explicit `use_insecure_tls` wins over the
/// legacy `verify_peer` flag.
pub(crate) fn resolve_tls_mode(signals: TlsSignals) -> Result<TlsMode> {
    if !signals.requested {
        if signals.insecure_override == Some(true) {
            return Err(Error::validation(
                "insecure_tls_with_tls_disabled",
                INSECURE_TLS_WITHOUT_TLS,
            ));
        }
        return Ok(TlsMode::NoTls);
    }

    let insecure = signals
        .insecure_override
        .unwrap_or(signals.legacy_skip_verify);
    Ok(if insecure {
        TlsMode::InsecureTls
    } else {
        TlsMode::SecureTls
    })
}
