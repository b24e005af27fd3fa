//! CA certificate collection.

use std::fs;
use std::io;
use std::path::Path;

use bytes::Bytes;

use crate::core::options::ClientOptions;
use crate::{Error, Result};

/// Collects at most one CA certificate blob.
///
/// Advanced config material is taken verbatim; a legacy `cafile` is read
/// from disk. Callers run the TLS source conflict check first, so at most
/// one source is present here.
pub(crate) fn resolve_root_certs(options: &ClientOptions) -> Result<Vec<Bytes>> {
    if let Some(certs) = options.tls_config().and_then(|tls| tls.root_certs.as_ref()) {
        return Ok(vec![certs.clone()]);
    }

    if let Some(path) = options.ssl_options().and_then(|ssl| ssl.cafile.as_deref()) {
        return load_certificate_file(path).map(|certs| vec![certs]);
    }

    Ok(Vec::new())
}

fn load_certificate_file(path: &Path) -> Result<Bytes> {
    let result = fs::read(path).and_then(|data| {
        if data.is_empty() {
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "certificate file is empty",
            ))
        } else {
            Ok(Bytes::from(data))
        }
    });

    result.map_err(|source| {
        tracing::error!(
            category = "tls_config_cafile",
            path = %path.display(),
            error = %source,
            "Failed to load root certificate from file"
        );
        Error::RootCertificate {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{AdvancedConfig, SslContextOptions, StreamContext, TlsConfig};
    use std::io::Write;

    const CERTIFICATE_DATA: &[u8] = b"CERTIFICATE_DATA";

    fn with_cafile(path: &Path) -> ClientOptions {
        ClientOptions {
            stream_context: Some(StreamContext::ssl(SslContextOptions {
                verify_peer: None,
                cafile: Some(path.to_path_buf()),
            })),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_source() {
        assert!(resolve_root_certs(&ClientOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_advanced_config_verbatim() {
        let options = ClientOptions {
            advanced_config: Some(AdvancedConfig {
                tls_config: Some(TlsConfig {
                    use_insecure_tls: None,
                    root_certs: Some(Bytes::from_static(CERTIFICATE_DATA)),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            resolve_root_certs(&options).unwrap(),
            vec![Bytes::from_static(CERTIFICATE_DATA)]
        );
    }

    #[test]
    fn test_tls_config_without_certs() {
        let options = ClientOptions {
            advanced_config: Some(AdvancedConfig {
                tls_config: Some(TlsConfig::default()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(resolve_root_certs(&options).unwrap().is_empty());
    }

    #[test]
    fn test_cafile_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CERTIFICATE_DATA).unwrap();

        let certs = resolve_root_certs(&with_cafile(file.path())).unwrap();
        assert_eq!(certs, vec![Bytes::from_static(CERTIFICATE_DATA)]);
    }

    #[test]
    fn test_cafile_missing() {
        let err = resolve_root_certs(&with_cafile(Path::new("/invalid/cert.pem"))).unwrap_err();
        assert!(err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("Failed to load root certificate from file"));
        assert!(msg.contains("/invalid/cert.pem"));
    }

    #[test]
    fn test_cafile_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = resolve_root_certs(&with_cafile(file.path())).unwrap_err();
        assert!(matches!(err, Error::RootCertificate { .. }));
    }
}
