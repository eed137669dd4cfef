//! Datasets de referencia grandes que no viven en el repositorio.
//!
//! `require_dataset` devuelve la ruta verificada o un `SkipUnit` con
//! instrucciones para el operador. Nunca falla la corrida: un dataset
//! ausente sólo omite las unidades que lo necesitan.
use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;

use crate::cache::{Availability, CacheEntry, ContentCache};
use crate::error::CacheError;
use crate::fingerprint::Fingerprint;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDataset {
    pub name: &'static str,
    pub file_name: &'static str,
    pub md5: &'static str,
    /// URL fija, cuando existe. El infiller no tiene link estable: su URL
    /// llega siempre explícita (configuración o línea de comandos).
    pub url: Option<&'static str>,
    /// Instrucciones de descarga manual.
    pub guidance: Option<&'static str>,
}

pub const INFILLER_DATABASE: ReferenceDataset = ReferenceDataset {
    name: "ar6 infiller database",
    file_name: "1652361598937-ar6_emissions_vetted_infillerdatabase_10.5281-zenodo.6390768.csv",
    md5: "30fae0530d76cbcb144f134e9ed0051f",
    url: None,
    guidance: Some("You can download the required file from https://data.ece.iiasa.ac.at/ar6/#/downloads under 'Infiller database for silicone: IPCC AR6 WGIII version (DOI: 10.5281/zenodo.6390768)'."),
};

pub const FAIR_SLIM_CONFIG: ReferenceDataset = ReferenceDataset {
    name: "FaIR slim config",
    file_name: "fair-1.6.2-wg3-params-slim.json",
    md5: "c071ca619c0ae37a6abdeb79c0cece7b",
    url: Some("https://zenodo.org/record/6601980/files/fair-1.6.2-wg3-params-slim.json?download=1"),
    guidance: None,
};

pub const FAIR_COMMON_CONFIG: ReferenceDataset = ReferenceDataset {
    name: "FaIR common config",
    file_name: "fair-1.6.2-wg3-params-common.json",
    md5: "42ccaffcd3dea88edfca77da0cd5789b",
    url: Some("https://zenodo.org/record/6601980/files/fair-1.6.2-wg3-params-common.json?download=1"),
    guidance: None,
};

impl ReferenceDataset {
    pub fn fingerprint(&self) -> Result<Fingerprint, CacheError> {
        self.md5.parse()
    }

    /// URL efectiva: la explícita, si no la fija.
    pub fn resolve_url(&self, explicit: Option<&str>) -> Option<String> {
        explicit.or(self.url).map(str::to_string)
    }

    pub fn entry(&self, data_dir: &Path, url: Option<&str>) -> Result<CacheEntry, CacheError> {
        let url = self.resolve_url(url).ok_or_else(|| CacheError::MissingUrl(self.name.to_string()))?;
        Ok(CacheEntry::new(data_dir.join(self.file_name), self.fingerprint()?, url))
    }
}

/// Unidad omitida porque un dataset de referencia no está disponible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipUnit {
    pub dataset: &'static str,
    pub reason: String,
    pub message: String,
}

impl SkipUnit {
    pub fn unavailable(dataset: &ReferenceDataset, data_dir: &Path, reason: String) -> Self {
        let mut message = format!("The {} was not found ({reason}), so this unit is skipped.", dataset.name);
        if let Some(guidance) = dataset.guidance {
            message.push(' ');
            message.push_str(guidance);
        }
        message.push_str(&format!(" Place '{}' into {} **without** changing its name and the unit will run again.",
                                  dataset.file_name,
                                  data_dir.display()));
        Self { dataset: dataset.name, reason, message }
    }
}

impl fmt::Display for SkipUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub fn require_dataset<T: Transport>(dataset: &ReferenceDataset, data_dir: &Path, url: Option<&str>, cache: &ContentCache<T>) -> Result<PathBuf, SkipUnit> {
    let entry = match dataset.entry(data_dir, url) {
        Ok(entry) => entry,
        Err(CacheError::MissingUrl(_)) => {
            // sin URL sólo sirve una copia local ya verificada
            let path = data_dir.join(dataset.file_name);
            return match dataset.fingerprint() {
                Ok(fp) if fp.matches_file(&path) => Ok(path),
                _ => Err(SkipUnit::unavailable(dataset, data_dir, "no download url configured".into())),
            };
        }
        Err(e) => return Err(SkipUnit::unavailable(dataset, data_dir, e.to_string())),
    };

    match cache.ensure_available(&entry) {
        Availability::Present | Availability::Downloaded => Ok(entry.path),
        Availability::Unavailable(reason) => {
            let skip = SkipUnit::unavailable(dataset, data_dir, reason.to_string());
            warn!("{skip}");
            Err(skip)
        }
    }
}

/// Todos los datasets conocidos.
pub const DATASETS: [ReferenceDataset; 3] = [INFILLER_DATABASE, FAIR_SLIM_CONFIG, FAIR_COMMON_CONFIG];
