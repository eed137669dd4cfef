//! Errores del cache de contenido.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid fingerprint '{0}' (expected 'md5:<hex>', 'sha256:<hex>', 'blake3:<hex>' or 32 hex chars)")]
    InvalidFingerprint(String),
    #[error("io error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("no download url configured for dataset '{0}'")]
    MissingUrl(String),
}

/// Falla de un intento de descarga. Siempre se degrada a "no disponible".
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error while downloading: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}
