//! Reporte de verificación de una unidad.
//!
//! Se serializa a JSON para que el CLI (o CI) pueda archivar el resultado
//! completo, incluidas todas las diferencias encontradas.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use regress_core::{ArtifactIdentity, ComparisonResult};

use crate::errors::HarnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Compara contra el baseline existente.
    Compare,
    /// Reescribe el baseline desde la salida actual.
    Capture,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Compare => f.write_str("compare"),
            RunMode::Capture => f.write_str("capture"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ArtifactOutcome {
    Compared { result: ComparisonResult },
    Captured { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactReport {
    pub identity: ArtifactIdentity,
    #[serde(flatten)]
    pub outcome: ArtifactOutcome,
}

/// Artifact que difiere del baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactMismatch {
    pub identity: ArtifactIdentity,
    pub diff: ComparisonResult,
}

impl fmt::Display for ArtifactMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} difference(s)", self.identity, self.diff.entries().len())?;
        let variables = self.diff.affected_variables();
        if !variables.is_empty() {
            writeln!(f, "  affected variables: {variables:?}")?;
        }
        for key in self.diff.mismatched_keys() {
            writeln!(f, "  mismatched key: {key}")?;
        }
        for entry in self.diff.entries() {
            writeln!(f, "  {entry}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub unit_id: String,
    pub mode: RunMode,
    pub artifacts: Vec<ArtifactReport>,
}

impl VerificationReport {
    pub fn new(unit_id: impl Into<String>, mode: RunMode) -> Self {
        Self { run_id: Uuid::new_v4(),
               started_at: Utc::now(),
               unit_id: unit_id.into(),
               mode,
               artifacts: Vec::new() }
    }

    pub fn push(&mut self, identity: ArtifactIdentity, outcome: ArtifactOutcome) {
        self.artifacts.push(ArtifactReport { identity, outcome });
    }

    pub fn mismatches(&self) -> Vec<ArtifactMismatch> {
        self.artifacts
            .iter()
            .filter_map(|a| match &a.outcome {
                ArtifactOutcome::Compared { result } if !result.is_equal() => Some(ArtifactMismatch { identity: a.identity.clone(), diff: result.clone() }),
                _ => None,
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.mismatches().is_empty()
    }

    /// El reporte si no hubo diferencias; si no, `HarnessError::Mismatch`
    /// con todos los artifacts que difieren.
    pub fn into_result(self) -> Result<Self, HarnessError> {
        let mismatches = self.mismatches();
        if mismatches.is_empty() {
            Ok(self)
        } else {
            Err(HarnessError::Mismatch { unit_id: self.unit_id, mismatches })
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), HarnessError> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}
