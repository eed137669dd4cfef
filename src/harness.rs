//! Verificación de una unidad contra su baseline.
//!
//! Flujo de `verify_unit`:
//! 1. resolver la familia de modelo (falla antes de tocar archivos);
//! 2. derivar los artifacts auxiliares en el directorio de salida;
//! 3. para cada `ArtifactKind` en orden fijo: cargar, normalizar y pasar a la
//!    estrategia (comparar o capturar).
//!
//! `check_workflow_output` convierte cualquier diferencia en
//! `HarnessError::Mismatch`; un reporte con diferencias nunca es éxito.
use std::path::PathBuf;

use log::{debug, info};

use regress_adapters::{require_sheet, read_first_sheet, UnitDirectory};
use regress_core::capture::keyed_to_raw;
use regress_core::constants::META_SHEET;
use regress_core::normalize::index_by_model_scenario;
use regress_core::{ArtifactIdentity, ArtifactKind, CaptureRule, Comparator, Normalizer, TableShape, Tolerance};

use crate::config::RegressConfig;
use crate::errors::HarnessError;
use crate::report::{RunMode, VerificationReport};
use crate::strategy::{BaselineStrategy, CaptureBaseline, CompareBaseline};

#[derive(Debug, Clone, PartialEq)]
pub struct UnitConfig {
    pub unit_id: String,
    pub output_dir: PathBuf,
    pub expected_dir: PathBuf,
    pub model: String,
    pub model_version: String,
    pub mode: RunMode,
    pub tolerance: Tolerance,
}

impl UnitConfig {
    pub fn new(unit_id: impl Into<String>,
               output_dir: impl Into<PathBuf>,
               expected_dir: impl Into<PathBuf>,
               model: impl Into<String>,
               model_version: impl Into<String>)
               -> Self {
        Self { unit_id: unit_id.into(),
               output_dir: output_dir.into(),
               expected_dir: expected_dir.into(),
               model: model.into(),
               model_version: model_version.into(),
               mode: RunMode::Compare,
               tolerance: Tolerance::DEFAULT }
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Toma modo y tolerancia de la configuración de entorno.
    pub fn with_env_defaults(self, config: &RegressConfig) -> Self {
        let mode = if config.update_expected { RunMode::Capture } else { RunMode::Compare };
        self.with_mode(mode).with_tolerance(config.tolerance)
    }

    pub fn output(&self) -> UnitDirectory {
        UnitDirectory::new(&self.output_dir, &self.unit_id)
    }

    pub fn expected(&self) -> UnitDirectory {
        UnitDirectory::new(&self.expected_dir, &self.unit_id)
    }
}

/// Escribe en el directorio de salida las representaciones de texto plano
/// de los workbooks (`CaptureRule::DerivedHelper`):
/// - metadata: hoja `meta` del workbook fuente, ordenada por (model, scenario);
/// - probabilidades: primera hoja sin la columna de índice serializada.
pub fn derive_helper_artifacts(output: &UnitDirectory) -> Result<(), HarnessError> {
    for kind in ArtifactKind::ALL {
        let CaptureRule::DerivedHelper { source } = kind.capture_rule() else { continue };
        let source_path = output.path_for(source);
        let table = match kind.shape() {
            TableShape::Metadata => keyed_to_raw(&index_by_model_scenario(&require_sheet(&source_path, META_SHEET)?)?),
            TableShape::Probability | TableShape::TimeSeries => read_first_sheet(&source_path)?.without_serialization_index(),
        };
        let written = output.write_table(kind, &table)?;
        debug!("derived {} from {}", written.display(), source_path.display());
    }
    Ok(())
}

/// Verifica (o captura) todos los artifacts de la unidad y devuelve el
/// reporte completo, con todas las diferencias encontradas.
pub fn verify_unit(config: &UnitConfig) -> Result<VerificationReport, HarnessError> {
    let normalizer = Normalizer::for_family(&config.model, &config.model_version)?;
    let output = config.output();
    let expected = config.expected();

    derive_helper_artifacts(&output)?;

    let strategy: Box<dyn BaselineStrategy + '_> = match config.mode {
        RunMode::Compare => Box::new(CompareBaseline::new(&normalizer, Comparator::new(config.tolerance), &expected)),
        RunMode::Capture => Box::new(CaptureBaseline::new(&output, &expected)),
    };

    let mut report = VerificationReport::new(&config.unit_id, strategy.mode());
    for kind in ArtifactKind::ALL {
        let identity = ArtifactIdentity::new(&config.unit_id, kind);
        info!("{} {}", strategy.mode(), output.path_for(kind).display());
        let actual = normalizer.normalize(kind, output.load(kind)?)?;
        let outcome = strategy.apply(kind, &actual)?;
        report.push(identity, outcome);
    }
    Ok(report)
}

/// Como `verify_unit`, pero cualquier diferencia es un error.
pub fn check_workflow_output(config: &UnitConfig) -> Result<VerificationReport, HarnessError> {
    verify_unit(config)?.into_result()
}
