//! Chequeo secundario contra el export de la base de datos de escenarios.
//!
//! La salida del workflow trae más series que el export (variables
//! auxiliares), así que se restringe al espacio de claves del export. Es el
//! único lugar donde se usa `compare_within_expected_keys`.
use std::path::Path;

use log::info;

use regress_adapters::read_first_sheet;
use regress_core::normalize::melt;
use regress_core::{Comparator, ComparisonResult, Tolerance};

use crate::errors::HarnessError;

pub fn check_consistency_with_database(output_file: &Path, expected_file: &Path, tolerance: Tolerance) -> Result<ComparisonResult, HarnessError> {
    let actual = melt(&read_first_sheet(output_file)?)?;
    let expected = melt(&read_first_sheet(expected_file)?)?;
    let result = Comparator::new(tolerance).compare_within_expected_keys(&actual, &expected);
    info!("consistency {} vs {}: {} difference(s)", output_file.display(), expected_file.display(), result.entries().len());
    Ok(result)
}
