//! Formas de escritura usadas por el modo captura.
//!
//! Las funciones son puras: producen la `RawTable` a escribir y dejan el IO a
//! la capa de adaptadores. Las filas salen siempre ordenadas para que los
//! diffs de baselines bajo control de versiones sean mínimos.
use std::collections::BTreeMap;

use crate::constants::{META_INDEX, SERIES_INDEX};
use crate::model::{KeyedTable, RawTable, SeriesKey, TimeSeriesTable, Value};

/// Capitaliza cada palabra alfabética (`model` -> `Model`,
/// `climate_model` -> `Climate_Model`). Los dígitos no cambian.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Serie temporal en formato ancho: una fila por serie, una columna por
/// período (ascendente), encabezados capitalizados.
pub fn sorted_wide(table: &TimeSeriesTable) -> RawTable {
    let periods = table.periods();
    let mut columns: Vec<String> = SERIES_INDEX.iter().map(|c| title_case(c)).collect();
    columns.extend(table.extra_columns.iter().map(|c| title_case(c)));
    columns.extend(periods.iter().map(|p| p.to_string()));

    let mut rows: BTreeMap<&SeriesKey, Vec<Value>> = BTreeMap::new();
    for ((key, period), value) in &table.points {
        let row = rows.entry(key).or_insert_with(|| vec![Value::Missing; periods.len()]);
        if let Ok(idx) = periods.binary_search(period) {
            row[idx] = Value::Number(*value);
        }
    }

    let mut out = RawTable::new(columns);
    for (key, values) in rows {
        let mut row: Vec<Value> = [&key.model, &key.scenario, &key.region, &key.variable, &key.unit].into_iter()
                                                                                                    .map(|s| Value::Text(s.clone()))
                                                                                                    .collect();
        row.extend(key.extra.iter().map(|s| Value::Text(s.clone())));
        row.extend(values);
        out.push_row(row);
    }
    out
}

/// Tabla indexada a formato plano con `model`, `scenario` al frente y filas
/// ordenadas por índice.
pub fn keyed_to_raw(table: &KeyedTable) -> RawTable {
    let mut columns: Vec<String> = META_INDEX.iter().map(|c| c.to_string()).collect();
    columns.extend(table.columns.iter().cloned());
    let mut out = RawTable::new(columns);
    for (key, values) in &table.rows {
        let mut row = vec![Value::Text(key.model.clone()), Value::Text(key.scenario.clone())];
        row.extend(table.columns.iter().map(|c| values.get(c).cloned().unwrap_or_default()));
        out.push_row(row);
    }
    out
}
