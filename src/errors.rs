//! Errores del harness.
//!
//! - `Configuration`: esquema desconocido; detiene la corrida.
//! - `Codec` / `Io` / `Report`: no se pudo leer o escribir un artifact.
//! - `Mismatch`: la unidad difiere del baseline. Falla sólo esa unidad.
use thiserror::Error;

use regress_adapters::CodecError;
use regress_core::ConfigurationError;

use crate::report::ArtifactMismatch;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),
    #[error("unit '{unit_id}': {} artifact(s) differ from the baseline\n{}", .mismatches.len(), describe(.mismatches))]
    Mismatch { unit_id: String, mismatches: Vec<ArtifactMismatch> },
}

fn describe(mismatches: &[ArtifactMismatch]) -> String {
    mismatches.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_variant_format() {
        let err: HarnessError = ConfigurationError::UnknownModelFamily("hector".into()).into();
        assert!(err.to_string().starts_with("configuration error: unrecognised model family 'hector'"));
    }

    #[test]
    fn io_variant_from() {
        let err: HarnessError = std::io::Error::other("falló IO").into();
        assert_eq!(err.to_string(), "io error: falló IO");
    }
}
