//! Errores del codec tabular.
//! Mapea errores de `csv` / `calamine` / IO a variantes con la ruta afectada.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("csv error on {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("workbook error on {path}: {message}")]
    Workbook { path: PathBuf, message: String },
    #[error("workbook {path} has no sheet '{sheet}'")]
    MissingSheet { path: PathBuf, sheet: String },
    #[error("workbook {path} has no sheets")]
    EmptyWorkbook { path: PathBuf },
}

impl CodecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }

    pub(crate) fn workbook(path: impl Into<PathBuf>, err: calamine::Error) -> Self {
        Self::Workbook { path: path.into(), message: err.to_string() }
    }

    /// Ruta del archivo que falló.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } | Self::Workbook { path, .. } | Self::MissingSheet { path, .. } | Self::EmptyWorkbook { path } => path,
        }
    }
}
