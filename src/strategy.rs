//! Estrategias de baseline.
//!
//! Comparación y captura comparten la canonicalización (`Normalizer`) y
//! divergen aquí: ambas reciben el artifact ya normalizado.
use log::{debug, info};

use regress_adapters::UnitDirectory;
use regress_core::capture::{keyed_to_raw, sorted_wide};
use regress_core::{ArtifactKind, CanonicalTable, CaptureRule, Comparator, Normalizer};

use crate::errors::HarnessError;
use crate::report::{ArtifactOutcome, RunMode};

pub trait BaselineStrategy {
    fn mode(&self) -> RunMode;

    /// Procesa un artifact normalizado de la salida actual.
    fn apply(&self, kind: ArtifactKind, actual: &CanonicalTable) -> Result<ArtifactOutcome, HarnessError>;
}

/// Lee el baseline, lo normaliza igual que la salida y compara.
pub struct CompareBaseline<'a> {
    normalizer: &'a Normalizer,
    comparator: Comparator,
    expected: &'a UnitDirectory,
}

impl<'a> CompareBaseline<'a> {
    pub fn new(normalizer: &'a Normalizer, comparator: Comparator, expected: &'a UnitDirectory) -> Self {
        Self { normalizer, comparator, expected }
    }
}

impl BaselineStrategy for CompareBaseline<'_> {
    fn mode(&self) -> RunMode {
        RunMode::Compare
    }

    fn apply(&self, kind: ArtifactKind, actual: &CanonicalTable) -> Result<ArtifactOutcome, HarnessError> {
        let expected = self.normalizer.normalize(kind, self.expected.load(kind)?)?;
        let result = self.comparator.compare(actual, &expected);
        if result.is_equal() {
            debug!("{kind}: equal");
        } else {
            info!("{kind}: {} difference(s), variables {:?}", result.entries().len(), result.affected_variables());
        }
        Ok(ArtifactOutcome::Compared { result })
    }
}

/// Sobrescribe el baseline sin consultarlo, según la `CaptureRule` del tipo.
pub struct CaptureBaseline<'a> {
    output: &'a UnitDirectory,
    expected: &'a UnitDirectory,
}

impl<'a> CaptureBaseline<'a> {
    pub fn new(output: &'a UnitDirectory, expected: &'a UnitDirectory) -> Self {
        Self { output, expected }
    }
}

impl BaselineStrategy for CaptureBaseline<'_> {
    fn mode(&self) -> RunMode {
        RunMode::Capture
    }

    fn apply(&self, kind: ArtifactKind, actual: &CanonicalTable) -> Result<ArtifactOutcome, HarnessError> {
        let path = match kind.capture_rule() {
            CaptureRule::SortedWide => {
                let raw = match actual {
                    CanonicalTable::TimeSeries(t) => sorted_wide(t),
                    CanonicalTable::Keyed(t) => keyed_to_raw(t),
                };
                self.expected.write_table(kind, &raw)?
            }
            // el helper ya fue derivado en el directorio de salida
            CaptureRule::DerivedHelper { .. } | CaptureRule::CopyNative => self.expected.copy_from(self.output, kind)?,
        };
        info!("{kind}: captured to {}", path.display());
        Ok(ArtifactOutcome::Captured { path })
    }
}
