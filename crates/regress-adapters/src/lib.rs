//! regress-adapters: codec tabular (CSV / XLSX) y directorios de unidad.
//!
//! Es la única capa que toca el sistema de archivos para leer artifacts;
//! `regress-core` recibe `RawTable` ya construidas.

pub mod csv_io;
pub mod error;
pub mod store;
pub mod xlsx;

pub use csv_io::{read_csv, write_csv};
pub use error::CodecError;
pub use store::UnitDirectory;
pub use xlsx::{read_first_sheet, read_iamc_workbook, read_sheet, require_sheet};
