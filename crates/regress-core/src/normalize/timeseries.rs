//! Melt de tablas IAMC anchas a forma larga.
use log::debug;

use crate::constants::SERIES_INDEX;
use crate::errors::ConfigurationError;
use crate::model::table::is_serialization_index;
use crate::model::{RawTable, SeriesKey, TimeSeriesTable, Value};

enum Role {
    Period(i64),
    Extra,
    Skip,
}

/// Encabezado de período: entero (`2010`) o flotante entero (`2010.0`, así
/// llegan los años desde algunos workbooks).
pub fn parse_period(header: &str) -> Option<i64> {
    let h = header.trim();
    if let Ok(p) = h.parse::<i64>() {
        return Some(p);
    }
    match h.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

/// Convierte una tabla ancha a `TimeSeriesTable`.
///
/// - Columnas clave (`model`, `scenario`, `region`, `variable`, `unit`) se
///   reconocen sin distinguir mayúsculas.
/// - Encabezados enteros son períodos.
/// - Índices sin nombre (`Unnamed: 0`, vacío) se descartan.
/// - Cualquier otra columna es una dimensión de clave extra (nombre en
///   minúsculas).
/// - Celdas ausentes no generan punto.
/// - Las etiquetas de clave se toman literales; sólo las celdas de período se
///   interpretan como número.
pub fn melt(raw: &RawTable) -> Result<TimeSeriesTable, ConfigurationError> {
    let mut key_pos = [0usize; 5];
    for (slot, name) in key_pos.iter_mut().zip(SERIES_INDEX) {
        *slot = raw.position_ignore_case(name).ok_or_else(|| ConfigurationError::MissingKeyColumn(name.to_string()))?;
    }

    let mut table = TimeSeriesTable::default();
    let mut roles = Vec::with_capacity(raw.columns.len());
    let mut extra_pos = Vec::new();
    for (i, col) in raw.columns.iter().enumerate() {
        let role = if key_pos.contains(&i) || is_serialization_index(col) {
            Role::Skip
        } else if let Some(p) = parse_period(col) {
            Role::Period(p)
        } else {
            table.extra_columns.push(col.to_lowercase());
            extra_pos.push(i);
            Role::Extra
        };
        roles.push(role);
    }

    for row in &raw.rows {
        let mut key = SeriesKey { model: row[key_pos[0]].label(),
                                  scenario: row[key_pos[1]].label(),
                                  region: row[key_pos[2]].label(),
                                  variable: row[key_pos[3]].label(),
                                  unit: row[key_pos[4]].label(),
                                  extra: Vec::with_capacity(extra_pos.len()) };
        for i in &extra_pos {
            key.extra.push(row[*i].label());
        }

        for (i, role) in roles.iter().enumerate() {
            let Role::Period(period) = role else { continue };
            let value = match row[i].typed() {
                Value::Missing => continue,
                Value::Number(n) => n,
                other => {
                    return Err(ConfigurationError::NonNumericValue { series: key.to_string(),
                                                                     period: *period,
                                                                     value: other.label() })
                }
            };
            if table.insert(key.clone(), *period, value).is_some() {
                return Err(ConfigurationError::DuplicateKey(format!("{key}@{period}")));
            }
        }
    }

    debug!("melted {} rows into {} points ({} extra columns)", raw.rows.len(), table.len(), table.extra_columns.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(columns: &[&str], rows: Vec<Vec<Value>>) -> RawTable {
        let mut t = RawTable::new(columns.iter().map(|c| c.to_string()).collect());
        for r in rows {
            t.push_row(r);
        }
        t
    }

    #[test]
    fn melts_and_sorts_by_full_key() {
        let raw = wide(&["Model", "Scenario", "Region", "Variable", "Unit", "2020", "2010"],
                       vec![vec!["m".into(), "s".into(), "World".into(), "Emissions|CO2".into(), "Mt CO2/yr".into(), 2.0.into(), 1.0.into()],
                            vec!["m".into(), "s".into(), "World".into(), "Emissions|CH4".into(), "Mt CH4/yr".into(), 4.0.into(), Value::Missing],]);
        let t = melt(&raw).unwrap();
        assert_eq!(t.len(), 3, "missing cells are not melted");
        let order: Vec<(String, i64)> = t.points.keys().map(|(k, p)| (k.variable.clone(), *p)).collect();
        assert_eq!(order,
                   vec![("Emissions|CH4".to_string(), 2020), ("Emissions|CO2".to_string(), 2010), ("Emissions|CO2".to_string(), 2020)]);
    }

    #[test]
    fn drops_unnamed_index_and_keeps_extra_labels() {
        let raw = wide(&["Unnamed: 0", "model", "scenario", "region", "variable", "unit", "Climate_Model", "2015.0"],
                       vec![vec![0.0.into(), "m".into(), "s".into(), "World".into(), "T".into(), "K".into(), "MAGICCv7".into(), 1.1.into()]]);
        let t = melt(&raw).unwrap();
        assert_eq!(t.extra_columns, vec!["climate_model".to_string()]);
        let (key, period) = t.points.keys().next().unwrap();
        assert_eq!(*period, 2015);
        assert_eq!(key.extra, vec!["MAGICCv7".to_string()]);
    }

    #[test]
    fn key_labels_are_kept_literally() {
        let raw = wide(&["model", "scenario", "region", "variable", "unit", "2010"],
                       vec![vec!["m".into(), Value::text_cell("1.50"), "World".into(), Value::text_cell("TRUE"), "K".into(), Value::text_cell("2.5")]]);
        let t = melt(&raw).unwrap();
        let (key, _) = t.points.keys().next().unwrap();
        assert_eq!(key.scenario, "1.50");
        assert_eq!(key.variable, "TRUE");
        assert_eq!(t.get(key, 2010), Some(2.5));
    }

    #[test]
    fn missing_key_column_fails() {
        let raw = wide(&["model", "scenario", "variable", "unit", "2010"], vec![]);
        assert_eq!(melt(&raw).unwrap_err(), ConfigurationError::MissingKeyColumn("region".into()));
    }

    #[test]
    fn duplicate_rows_fail() {
        let row = vec!["m".into(), "s".into(), "World".into(), "T".into(), "K".into(), 1.0.into()];
        let raw = wide(&["model", "scenario", "region", "variable", "unit", "2010"], vec![row.clone(), row]);
        assert!(matches!(melt(&raw), Err(ConfigurationError::DuplicateKey(_))));
    }
}
