//! Cache de contenido verificado por huella.
//!
//! Contrato de `ensure_available`:
//! - archivo presente con la huella correcta: `Present`, sin red ni escrituras;
//! - si no, exactamente un intento de descarga a un temporal del directorio
//!   destino, verificación, `persist` al destino y re-verificación;
//! - cualquier falla termina en `Unavailable` con la causa. Nunca hay
//!   reintentos automáticos ni escrituras parciales en el destino.
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::fingerprint::Fingerprint;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub fingerprint: Fingerprint,
    pub url: String,
}

impl CacheEntry {
    pub fn new(path: impl Into<PathBuf>, fingerprint: Fingerprint, url: impl Into<String>) -> Self {
        Self { path: path.into(), fingerprint, url: url.into() }
    }
}

/// Motivo por el que un archivo no quedó disponible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// Red, status HTTP, lectura del cuerpo o IO local durante la descarga.
    Transport(String),
    /// El contenido descargado no tiene la huella esperada.
    Integrity { expected: Fingerprint, found: String },
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::Transport(msg) => write!(f, "download failed: {msg}"),
            Unavailable::Integrity { expected, found } => write!(f, "integrity check failed: expected {expected}, found {found}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Present,
    Downloaded,
    Unavailable(Unavailable),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        !matches!(self, Availability::Unavailable(_))
    }
}

pub struct ContentCache<T: Transport> {
    transport: T,
}

impl<T: Transport> ContentCache<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn ensure_available(&self, entry: &CacheEntry) -> Availability {
        if entry.fingerprint.matches_file(&entry.path) {
            debug!("{} present with {}", entry.path.display(), entry.fingerprint);
            return Availability::Present;
        }

        info!("{} missing or stale, downloading from {}", entry.path.display(), entry.url);
        let outcome = match self.download(entry) {
            Ok(()) => Availability::Downloaded,
            Err(reason) => Availability::Unavailable(reason),
        };
        if let Availability::Unavailable(reason) = &outcome {
            warn!("{} unavailable: {reason}", entry.path.display());
        }
        outcome
    }

    fn download(&self, entry: &CacheEntry) -> Result<(), Unavailable> {
        let dir = match entry.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| Unavailable::Transport(format!("create {}: {e}", dir.display())))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| Unavailable::Transport(format!("temp file in {}: {e}", dir.display())))?;
        let bytes = self.transport.fetch(&entry.url, tmp.as_file_mut()).map_err(|e| Unavailable::Transport(e.to_string()))?;
        tmp.as_file_mut().flush().map_err(|e| Unavailable::Transport(e.to_string()))?;
        debug!("fetched {bytes} bytes for {}", entry.path.display());

        // el temporal se borra al salir si no se persiste
        verify(&entry.fingerprint, tmp.path())?;
        tmp.persist(&entry.path).map_err(|e| Unavailable::Transport(format!("persist {}: {}", entry.path.display(), e.error)))?;

        verify(&entry.fingerprint, &entry.path)
    }
}

fn verify(expected: &Fingerprint, path: &Path) -> Result<(), Unavailable> {
    match Fingerprint::of_file(expected.algorithm(), path) {
        Ok(found) if found == *expected => Ok(()),
        Ok(found) => Err(Unavailable::Integrity { expected: expected.clone(), found: found.to_string() }),
        Err(e) => Err(Unavailable::Integrity { expected: expected.clone(), found: format!("unreadable ({e})") }),
    }
}
