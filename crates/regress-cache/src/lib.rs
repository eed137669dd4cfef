//! regress-cache: cache de archivos grandes direccionado por contenido.
//!
//! Garantiza que un archivo de referencia esté presente con la huella
//! esperada, o lo descarga y re-verifica; si no se puede, lo informa como
//! `Unavailable` para que el harness omita la unidad.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod fingerprint;
pub mod transport;

pub use cache::{Availability, CacheEntry, ContentCache, Unavailable};
pub use dataset::{require_dataset, ReferenceDataset, SkipUnit, DATASETS, FAIR_COMMON_CONFIG, FAIR_SLIM_CONFIG, INFILLER_DATABASE};
pub use error::{CacheError, TransportError};
pub use fingerprint::{Fingerprint, HashAlgorithm};
pub use transport::{HttpTransport, Transport};
