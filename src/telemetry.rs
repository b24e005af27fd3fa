//! OpenTelemetry settings passed to the engine.
//!
//! The assembler never inspects these; each builder validates its own
//! inputs, so an [`OpenTelemetryConfig`] that exists is well formed.

use crate::{Error, Result};

/// Default flush interval in milliseconds.
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 5000;

/// Default trace sampling percentage.
pub const DEFAULT_SAMPLE_PERCENTAGE: u8 = 1;

/// Trace export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracesConfig {
    endpoint: String,
    sample_percentage: u8,
}

impl TracesConfig {
    /// Returns a builder.
    pub fn builder() -> TracesConfigBuilder {
        TracesConfigBuilder::default()
    }

    /// Collector endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Share of requests traced, 0-100.
    pub fn sample_percentage(&self) -> u8 {
        self.sample_percentage
    }
}

/// Builder for [`TracesConfig`].
#[derive(Debug, Clone)]
pub struct TracesConfigBuilder {
    endpoint: Option<String>,
    sample_percentage: u8,
}

impl Default for TracesConfigBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            sample_percentage: DEFAULT_SAMPLE_PERCENTAGE,
        }
    }
}

impl TracesConfigBuilder {
    /// Sets the collector endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `endpoint` is empty.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(Error::validation(
                "otel_config",
                "Traces endpoint cannot be empty",
            ));
        }
        self.endpoint = Some(endpoint);
        Ok(self)
    }

    /// Sets the sampling percentage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `percentage` is outside 0-100.
    pub fn sample_percentage(mut self, percentage: i64) -> Result<Self> {
        let percentage = u8::try_from(percentage)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                Error::validation("otel_config", "Sample percentage must be between 0 and 100")
            })?;
        self.sample_percentage = percentage;
        Ok(self)
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if no endpoint was set.
    pub fn build(self) -> Result<TracesConfig> {
        let endpoint = self.endpoint.ok_or_else(|| {
            Error::validation(
                "otel_config",
                "Traces endpoint is required when traces config is provided",
            )
        })?;
        Ok(TracesConfig {
            endpoint,
            sample_percentage: self.sample_percentage,
        })
    }
}

/// Metrics export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    endpoint: String,
}

impl MetricsConfig {
    /// Creates a metrics config for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `endpoint` is empty.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(Error::validation(
                "otel_config",
                "Metrics endpoint cannot be empty",
            ));
        }
        Ok(Self { endpoint })
    }

    /// Collector endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Top-level telemetry settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTelemetryConfig {
    traces: Option<TracesConfig>,
    metrics: Option<MetricsConfig>,
    flush_interval_ms: u64,
}

impl OpenTelemetryConfig {
    /// Returns a builder.
    pub fn builder() -> OpenTelemetryConfigBuilder {
        OpenTelemetryConfigBuilder::default()
    }

    /// Trace settings, if configured.
    pub fn traces(&self) -> Option<&TracesConfig> {
        self.traces.as_ref()
    }

    /// Metrics settings, if configured.
    pub fn metrics(&self) -> Option<&MetricsConfig> {
        self.metrics.as_ref()
    }

    /// How often buffered telemetry is exported.
    pub fn flush_interval_ms(&self) -> u64 {
        self.flush_interval_ms
    }
}

/// Builder for [`OpenTelemetryConfig`].
#[derive(Debug, Clone)]
pub struct OpenTelemetryConfigBuilder {
    traces: Option<TracesConfig>,
    metrics: Option<MetricsConfig>,
    flush_interval_ms: u64,
}

impl Default for OpenTelemetryConfigBuilder {
    fn default() -> Self {
        Self {
            traces: None,
            metrics: None,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
        }
    }
}

impl OpenTelemetryConfigBuilder {
    /// Sets trace settings.
    #[inline]
    pub fn traces(mut self, traces: TracesConfig) -> Self {
        self.traces = Some(traces);
        self
    }

    /// Sets metrics settings.
    #[inline]
    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Sets the flush interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `interval_ms` is positive.
    pub fn flush_interval_ms(mut self, interval_ms: i64) -> Result<Self> {
        if interval_ms <= 0 {
            return Err(Error::validation(
                "otel_config",
                "Flush interval must be a positive integer",
            ));
        }
        self.flush_interval_ms = interval_ms as u64;
        Ok(self)
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if neither traces nor metrics are set.
    pub fn build(self) -> Result<OpenTelemetryConfig> {
        if self.traces.is_none() && self.metrics.is_none() {
            return Err(Error::validation(
                "otel_config",
                "At least one of traces or metrics must be configured",
            ));
        }
        Ok(OpenTelemetryConfig {
            traces: self.traces,
            metrics: self.metrics,
            flush_interval_ms: self.flush_interval_ms,
        })
    }
}
