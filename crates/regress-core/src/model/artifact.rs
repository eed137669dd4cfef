//! Identidad de artifacts de salida.
//!
//! Un `ArtifactKind` determina de forma estática y total:
//! - el sufijo de archivo (`{unit_id}{suffix}`),
//! - el formato de salida (`OutputFormat`),
//! - la forma de la tabla (`TableShape`) y por ende las reglas de
//!   canonicalización,
//! - si aplica la proyección de columnas de procedencia,
//! - la regla de captura (`CaptureRule`) del modo de actualización.
//!
//! Nada en el harness debe inspeccionar la extensión de un archivo para
//! decidir comportamiento; todo sale de estas tablas.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Codificación en disco de un artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

/// Forma lógica de la tabla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// Tabla IAMC ancha: claves + una columna por período.
    TimeSeries,
    /// Tabla plana indexada por (model, scenario) con columnas de resumen.
    Metadata,
    /// Tabla de probabilidades de excedencia indexada por (model, scenario).
    Probability,
}

/// Qué hace el modo captura con cada artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureRule {
    /// Copia byte a byte (workbooks).
    CopyNative,
    /// Reescribe la forma canónica en formato ancho con filas ordenadas.
    SortedWide,
    /// Representación de texto plano derivada de un workbook nativo.
    DerivedHelper { source: ArtifactKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    HarmonizedInfilled,
    AllOutput,
    AllOutputMeta,
    IamcCsv,
    IamcXlsx,
    ExceedanceProbabilitiesXlsx,
    ExceedanceProbabilitiesCsv,
}

impl ArtifactKind {
    /// Orden fijo en que se verifica una unidad.
    pub const ALL: [ArtifactKind; 7] = [ArtifactKind::HarmonizedInfilled,
                                        ArtifactKind::AllOutput,
                                        ArtifactKind::AllOutputMeta,
                                        ArtifactKind::IamcCsv,
                                        ArtifactKind::IamcXlsx,
                                        ArtifactKind::ExceedanceProbabilitiesXlsx,
                                        ArtifactKind::ExceedanceProbabilitiesCsv];

    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::HarmonizedInfilled => "_harmonized_infilled.csv",
            ArtifactKind::AllOutput => "_alloutput.xlsx",
            ArtifactKind::AllOutputMeta => "_alloutput_meta.csv",
            ArtifactKind::IamcCsv => "_IAMC_climateassessment0000.csv",
            ArtifactKind::IamcXlsx => "_IAMC_climateassessment.xlsx",
            ArtifactKind::ExceedanceProbabilitiesXlsx => "_full_exceedance_probabilities.xlsx",
            ArtifactKind::ExceedanceProbabilitiesCsv => "_full_exceedance_probabilities.csv",
        }
    }

    pub fn format(self) -> OutputFormat {
        match self {
            ArtifactKind::HarmonizedInfilled
            | ArtifactKind::AllOutputMeta
            | ArtifactKind::IamcCsv
            | ArtifactKind::ExceedanceProbabilitiesCsv => OutputFormat::Csv,
            ArtifactKind::AllOutput | ArtifactKind::IamcXlsx | ArtifactKind::ExceedanceProbabilitiesXlsx => OutputFormat::Xlsx,
        }
    }

    pub fn shape(self) -> TableShape {
        match self {
            ArtifactKind::HarmonizedInfilled | ArtifactKind::AllOutput | ArtifactKind::IamcCsv | ArtifactKind::IamcXlsx => TableShape::TimeSeries,
            ArtifactKind::AllOutputMeta => TableShape::Metadata,
            ArtifactKind::ExceedanceProbabilitiesXlsx | ArtifactKind::ExceedanceProbabilitiesCsv => TableShape::Probability,
        }
    }

    /// El meta de estos artifacts trae columnas de procedencia que se
    /// verifican y descartan antes de comparar.
    pub fn projects_provenance(self) -> bool {
        matches!(self, ArtifactKind::AllOutput | ArtifactKind::AllOutputMeta)
    }

    pub fn capture_rule(self) -> CaptureRule {
        match self {
            ArtifactKind::AllOutputMeta => CaptureRule::DerivedHelper { source: ArtifactKind::AllOutput },
            ArtifactKind::ExceedanceProbabilitiesCsv => CaptureRule::DerivedHelper { source: ArtifactKind::ExceedanceProbabilitiesXlsx },
            ArtifactKind::HarmonizedInfilled | ArtifactKind::IamcCsv => CaptureRule::SortedWide,
            ArtifactKind::AllOutput | ArtifactKind::IamcXlsx | ArtifactKind::ExceedanceProbabilitiesXlsx => CaptureRule::CopyNative,
        }
    }

    /// Nombre de archivo para una unidad.
    pub fn file_name(self, unit_id: &str) -> String {
        format!("{unit_id}{}", self.suffix())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // el sufijo sin el separador inicial es lo que se ve en los logs
        f.write_str(self.suffix().trim_start_matches('_'))
    }
}

/// Par (unidad lógica, tipo de artifact).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactIdentity {
    pub unit_id: String,
    pub kind: ArtifactKind,
}

impl ArtifactIdentity {
    pub fn new(unit_id: impl Into<String>, kind: ArtifactKind) -> Self {
        Self { unit_id: unit_id.into(), kind }
    }

    pub fn file_name(&self) -> String {
        self.kind.file_name(&self.unit_id)
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_matches_suffix_extension() {
        for kind in ArtifactKind::ALL {
            let ext = match kind.format() {
                OutputFormat::Csv => ".csv",
                OutputFormat::Xlsx => ".xlsx",
            };
            assert!(kind.suffix().ends_with(ext), "{kind:?} declares {:?} but suffix is {}", kind.format(), kind.suffix());
        }
    }

    #[test]
    fn helper_artifacts_derive_from_workbooks() {
        for kind in ArtifactKind::ALL {
            if let CaptureRule::DerivedHelper { source } = kind.capture_rule() {
                assert_eq!(kind.format(), OutputFormat::Csv);
                assert_eq!(source.format(), OutputFormat::Xlsx);
                assert_eq!(source.shape() == TableShape::Probability, kind.shape() == TableShape::Probability);
            }
        }
    }

    #[test]
    fn identity_builds_file_name() {
        let id = ArtifactIdentity::new("ex2", ArtifactKind::IamcCsv);
        assert_eq!(id.file_name(), "ex2_IAMC_climateassessment0000.csv");
        assert_eq!(id.to_string(), "ex2_IAMC_climateassessment0000.csv");
    }
}
