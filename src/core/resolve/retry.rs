use crate::core::options::ReconnectStrategy;
use crate::request::ConnectionRetryStrategy;

/// Carries reconnect parameters into the request unchanged. Bounds are the
/// engine's business.
pub(crate) fn build_retry_strategy(
    strategy: Option<&ReconnectStrategy>,
) -> Option<ConnectionRetryStrategy> {
    strategy.map(|s| ConnectionRetryStrategy {
        number_of_retries: s.num_of_retries,
        factor: s.factor,
        exponent_base: s.exponent_base,
        jitter_percent: s.jitter_percent,
        max_delay: s.max_delay,
    })
}
