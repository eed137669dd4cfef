//! Normalizador canónico.
//!
//! `Normalizer::normalize` es el único punto por el que pasan los artifacts
//! tanto en modo comparación como en modo captura: la canonicalización es
//! compartida y las estrategias divergen recién después.

pub mod keyed;
pub mod timeseries;

use log::debug;

use crate::errors::ConfigurationError;
use crate::model::{ArtifactKind, CanonicalTable, FamilyColumns, KeyedTable, ModelFamily, RawArtifact, RawTable, TableShape};

pub use keyed::{index_by_model_scenario, project_provenance};
pub use timeseries::{melt, parse_period};

#[derive(Debug, Clone)]
pub struct Normalizer {
    columns: FamilyColumns,
}

impl Normalizer {
    pub fn new(family: ModelFamily, version: &str) -> Self {
        Self { columns: FamilyColumns::new(family, version) }
    }

    /// Construye el normalizador a partir del nombre de familia tal como lo
    /// recibe el harness. Una familia desconocida es un error de configuración.
    pub fn for_family(family: &str, version: &str) -> Result<Self, ConfigurationError> {
        Ok(Self::new(family.parse()?, version))
    }

    pub fn normalize(&self, kind: ArtifactKind, raw: RawArtifact) -> Result<CanonicalTable, ConfigurationError> {
        debug!("normalizing {kind} as {:?}", kind.shape());
        match kind.shape() {
            TableShape::TimeSeries => {
                let mut table = melt(&raw.data)?;
                table.meta = match raw.meta {
                    Some(meta) => Some(self.metadata(kind, &meta)?),
                    None => None,
                };
                Ok(CanonicalTable::TimeSeries(table))
            }
            TableShape::Metadata => Ok(CanonicalTable::Keyed(self.metadata(kind, &raw.data)?)),
            TableShape::Probability => Ok(CanonicalTable::Keyed(index_by_model_scenario(&raw.data)?)),
        }
    }

    fn metadata(&self, kind: ArtifactKind, raw: &RawTable) -> Result<KeyedTable, ConfigurationError> {
        let table = index_by_model_scenario(raw)?;
        if kind.projects_provenance() {
            project_provenance(table, &self.columns)
        } else {
            Ok(table)
        }
    }
}
