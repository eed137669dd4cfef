//! Lectura y escritura de tablas en CSV.
//!
//! Las celdas se leen literales (`Value::text_cell`): interpretar números y
//! booleanos le corresponde al normalizador. Al escribir, los valores
//! ausentes quedan como celda vacía.
use std::path::Path;

use log::debug;
use regress_core::{RawTable, Value};

use crate::error::CodecError;

pub fn read_csv(path: &Path) -> Result<RawTable, CodecError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true)
                                           .from_path(path)
                                           .map_err(|e| CodecError::csv(path, e))?;
    let headers = rdr.headers().map_err(|e| CodecError::csv(path, e))?;
    let mut table = RawTable::new(headers.iter().map(|h| h.trim().to_string()).collect());

    for record in rdr.records() {
        let record = record.map_err(|e| CodecError::csv(path, e))?;
        table.push_row(record.iter().map(Value::text_cell).collect());
    }
    debug!("read {} rows x {} columns from {}", table.rows.len(), table.columns.len(), path.display());
    Ok(table)
}

pub fn write_csv(path: &Path, table: &RawTable) -> Result<(), CodecError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| CodecError::csv(path, e))?;
    wtr.write_record(&table.columns).map_err(|e| CodecError::csv(path, e))?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(Value::label)).map_err(|e| CodecError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| CodecError::io(path, e))?;
    debug!("wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
