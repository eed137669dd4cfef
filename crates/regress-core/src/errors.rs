//! Errores de configuración / esquema.
//!
//! Todos indican que el esquema de los artifacts cambió de una forma que el
//! harness no entiende. Nunca se capturan: deben detener la corrida.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unrecognised model family '{0}' (expected one of MAGICC, FAIR, CICERO-SCM)")]
    UnknownModelFamily(String),

    #[error("provenance columns {found:?} not equal to {expected:?}")]
    ProvenanceColumnsMismatch { found: BTreeSet<String>, expected: BTreeSet<String> },

    #[error("metadata is missing expected columns: {0:?}")]
    MissingKeepColumns(Vec<String>),

    #[error("table is missing key column '{0}'")]
    MissingKeyColumn(String),

    #[error("duplicate key in table: {0}")]
    DuplicateKey(String),

    #[error("non-numeric value '{value}' for {series} in period {period}")]
    NonNumericValue { series: String, period: i64, value: String },
}
