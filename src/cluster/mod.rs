//! # Cluster options
//!
//! Settings that only exist for cluster clients. The assembler consults
//! this module only when the client mode is [`ClientMode::Cluster`];
//! standalone requests never carry these fields.
//!
//! [`ClientMode::Cluster`]: crate::core::options::ClientMode::Cluster

mod periodic;

pub(crate) use periodic::build_periodic_checks;
pub use periodic::{
    PeriodicChecksOption, PERIODIC_CHECK_DISABLED, PERIODIC_CHECK_ENABLED_DEFAULT_CONFIGS,
};

use crate::core::options::ClientOptions;

/// Reads `advanced_config.refresh_topology_from_initial_nodes`, `false` when unset.
pub(crate) fn refresh_topology_from_initial_nodes(options: &ClientOptions) -> bool {
    options
        .advanced_config
        .as_ref()
        .and_then(|advanced| advanced.refresh_topology_from_initial_nodes)
        .unwrap_or(false)
}
