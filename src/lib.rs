//! climate-regress: harness de regresión para el workflow de evaluación
//! climática.
//!
//! Este crate actúa como la capa de orquestación:
//! - `harness`: verificación de una unidad (comparar o capturar baselines).
//! - `consistency`: chequeo secundario contra el export de base de datos.
//! - `reference`: datasets de referencia vía `regress-cache`.
//! - `report`: reporte serializable de cada corrida.
//!
//! La lógica pura vive en `regress-core`; el IO tabular en `regress-adapters`.

pub mod config;
pub mod consistency;
pub mod errors;
pub mod harness;
pub mod reference;
pub mod report;
pub mod strategy;

pub use config::RegressConfig;
pub use consistency::check_consistency_with_database;
pub use errors::HarnessError;
pub use harness::{check_workflow_output, derive_helper_artifacts, verify_unit, UnitConfig};
pub use reference::require_reference_data;
pub use report::{ArtifactMismatch, ArtifactOutcome, ArtifactReport, RunMode, VerificationReport};
pub use strategy::{BaselineStrategy, CaptureBaseline, CompareBaseline};
