use crate::core::options::CompressionOptions;
use crate::request::{CompressionBackend, CompressionConfig};
use crate::{Error, Result};

/// Resolves compression settings, filling per-backend defaults.
///
/// Levels are not range-checked; the backend does that.
pub(crate) fn build_compression_config(
    options: Option<&CompressionOptions>,
) -> Result<Option<CompressionConfig>> {
    let Some(options) = options else {
        return Ok(None);
    };

    let enabled = options.enabled.unwrap_or(false);
    let backend = match (enabled, options.backend) {
        (_, Some(backend)) => backend,
        (true, None) => {
            return Err(Error::validation(
                "compression_config",
                "Compression backend must be specified when compression is enabled.",
            ))
        }
        (false, None) => CompressionBackend::default(),
    };

    Ok(Some(CompressionConfig {
        enabled,
        backend,
        compression_level: options
            .compression_level
            .unwrap_or_else(|| backend.default_level()),
        min_compression_size: options
            .min_compression_size
            .unwrap_or_else(|| backend.default_min_compression_size()),
    }))
}
