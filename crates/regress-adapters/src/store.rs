//! Directorio de artifacts de una unidad (salida o baseline).
use std::fs;
use std::path::PathBuf;

use log::debug;
use regress_core::{ArtifactKind, OutputFormat, RawArtifact, RawTable, TableShape};

use crate::csv_io::{read_csv, write_csv};
use crate::error::CodecError;
use crate::xlsx::{read_first_sheet, read_iamc_workbook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDirectory {
    dir: PathBuf,
    unit_id: String,
}

impl UnitDirectory {
    pub fn new(dir: impl Into<PathBuf>, unit_id: impl Into<String>) -> Self {
        Self { dir: dir.into(), unit_id: unit_id.into() }
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.file_name(&self.unit_id))
    }

    /// Lee el artifact según su formato: CSV plano, workbook IAMC
    /// (`data` + `meta`) o workbook de una sola hoja.
    pub fn load(&self, kind: ArtifactKind) -> Result<RawArtifact, CodecError> {
        let path = self.path_for(kind);
        debug!("loading {kind} from {}", path.display());
        match (kind.format(), kind.shape()) {
            (OutputFormat::Csv, _) => Ok(RawArtifact::new(read_csv(&path)?)),
            (OutputFormat::Xlsx, TableShape::TimeSeries) => read_iamc_workbook(&path),
            (OutputFormat::Xlsx, _) => Ok(RawArtifact::new(read_first_sheet(&path)?)),
        }
    }

    pub fn write_table(&self, kind: ArtifactKind, table: &RawTable) -> Result<PathBuf, CodecError> {
        let path = self.path_for(kind);
        self.ensure_dir()?;
        write_csv(&path, table)?;
        Ok(path)
    }

    /// Copia byte a byte el artifact `kind` desde `source`.
    pub fn copy_from(&self, source: &UnitDirectory, kind: ArtifactKind) -> Result<PathBuf, CodecError> {
        let from = source.path_for(kind);
        let to = self.path_for(kind);
        self.ensure_dir()?;
        fs::copy(&from, &to).map_err(|e| CodecError::io(&from, e))?;
        debug!("copied {} -> {}", from.display(), to.display());
        Ok(to)
    }

    fn ensure_dir(&self) -> Result<(), CodecError> {
        fs::create_dir_all(&self.dir).map_err(|e| CodecError::io(&self.dir, e))
    }
}
