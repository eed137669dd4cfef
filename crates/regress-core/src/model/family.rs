//! Familias de modelo climático y columnas de resumen versionadas.
//!
//! Cada familia tiene una entrada en `FAMILY_TABLE` con:
//! - el nombre canónico con el que se reconoce (sin distinguir mayúsculas),
//! - el generador del "model version string" que aparece entre paréntesis en
//!   las columnas de resumen (`MAGICC7.5.3`, `FaIRv1.6.2`, `CICERO-SCM`),
//! - el generador de la lista de columnas a mantener en la metadata.
//!
//! Agregar una familia nueva es agregar una fila a la tabla.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    Magicc,
    Fair,
    CiceroScm,
}

struct FamilySpec {
    family: ModelFamily,
    name: &'static str,
    version_string: fn(&str) -> String,
    keep_columns: fn(&str) -> Vec<String>,
}

static FAMILY_TABLE: [FamilySpec; 3] = [FamilySpec { family: ModelFamily::Magicc,
                                                     name: "MAGICC",
                                                     version_string: magicc_version,
                                                     keep_columns: ar6_summary_columns },
                                        FamilySpec { family: ModelFamily::Fair,
                                                     name: "FAIR",
                                                     version_string: fair_version,
                                                     keep_columns: ar6_summary_columns },
                                        FamilySpec { family: ModelFamily::CiceroScm,
                                                     name: "CICERO-SCM",
                                                     version_string: cicero_version,
                                                     keep_columns: ar6_summary_columns }];

fn magicc_version(version: &str) -> String {
    format!("MAGICC{version}")
}

fn fair_version(version: &str) -> String {
    format!("FaIRv{version}")
}

// CICERO-SCM no versiona sus columnas
fn cicero_version(_version: &str) -> String {
    "CICERO-SCM".to_string()
}

const WARMING_LEVELS: [&str; 8] = ["1.5", "2.0", "2.5", "3.0", "3.5", "4.0", "4.5", "5.0"];
const PERCENTILES: [&str; 12] = ["p5", "p10", "p17", "p25", "p33", "median", "p66", "p67", "p75", "p83", "p90", "p95"];
const STATISTICS: [&str; 3] = ["peak warming", "warming in 2100", "year of peak warming"];

/// Columnas de clasificación + probabilidades de excedencia + percentiles
/// de calentamiento tal como las escribe la evaluación AR6.
fn ar6_summary_columns(version: &str) -> Vec<String> {
    let mut cols: Vec<String> = vec!["exclude".into(), "Category".into(), "Category_name".into()];
    cols.extend(WARMING_LEVELS.iter().map(|level| format!("Exceedance Probability {level}C ({version})")));
    for stat in STATISTICS {
        cols.extend(PERCENTILES.iter().map(|pct| format!("{pct} {stat} ({version})")));
    }
    cols
}

impl ModelFamily {
    fn spec(self) -> &'static FamilySpec {
        // FAMILY_TABLE sigue el orden de declaración del enum
        &FAMILY_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn version_string(self, version: &str) -> String {
        (self.spec().version_string)(version)
    }
}

impl FromStr for ModelFamily {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        FAMILY_TABLE.iter()
                    .find(|spec| spec.name == upper)
                    .map(|spec| spec.family)
                    .ok_or_else(|| ConfigurationError::UnknownModelFamily(s.to_string()))
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Columnas resueltas para una (familia, versión) concreta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyColumns {
    version_string: String,
    keep: Vec<String>,
}

impl FamilyColumns {
    pub fn new(family: ModelFamily, version: &str) -> Self {
        let spec = family.spec();
        let version_string = (spec.version_string)(version);
        let keep = (spec.keep_columns)(&version_string);
        Self { version_string, keep }
    }

    pub fn version_string(&self) -> &str {
        &self.version_string
    }

    pub fn keep_columns(&self) -> &[String] {
        &self.keep
    }
}
