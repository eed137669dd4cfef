//! Tablas indexadas por (model, scenario): metadata y probabilidades.
use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::debug;

use crate::constants::{META_INDEX, PROVENANCE_COLUMNS};
use crate::errors::ConfigurationError;
use crate::model::table::is_serialization_index;
use crate::model::{FamilyColumns, KeyedTable, MetaKey, RawTable};

/// Indexa la tabla por (model, scenario). Descarta índices sin nombre.
/// El índice se toma literal; el resto de las celdas se interpreta.
pub fn index_by_model_scenario(raw: &RawTable) -> Result<KeyedTable, ConfigurationError> {
    let model_pos = raw.position_ignore_case(META_INDEX[0]).ok_or_else(|| ConfigurationError::MissingKeyColumn(META_INDEX[0].to_string()))?;
    let scenario_pos = raw.position_ignore_case(META_INDEX[1]).ok_or_else(|| ConfigurationError::MissingKeyColumn(META_INDEX[1].to_string()))?;

    let value_pos: Vec<usize> = (0..raw.columns.len()).filter(|i| *i != model_pos && *i != scenario_pos && !is_serialization_index(&raw.columns[*i]))
                                                      .collect();

    let mut table = KeyedTable { columns: value_pos.iter().map(|i| raw.columns[*i].clone()).collect(),
                                 ..Default::default() };
    for row in &raw.rows {
        let key = MetaKey::new(row[model_pos].label(), row[scenario_pos].label());
        let values: IndexMap<String, _> = value_pos.iter().map(|i| (raw.columns[*i].clone(), row[*i].typed())).collect();
        if table.rows.contains_key(&key) {
            return Err(ConfigurationError::DuplicateKey(key.to_string()));
        }
        table.rows.insert(key, values);
    }
    Ok(table)
}

/// Verifica el esquema de la metadata del full-run y proyecta a las columnas
/// estables.
///
/// El conjunto `columnas - keep` debe ser exactamente `PROVENANCE_COLUMNS` y
/// todas las columnas `keep` deben existir. Cualquier otra cosa significa que
/// el esquema de salida cambió y se reporta como `ConfigurationError` en vez
/// de comparar un subconjunto en silencio.
pub fn project_provenance(table: KeyedTable, columns: &FamilyColumns) -> Result<KeyedTable, ConfigurationError> {
    let keep = columns.keep_columns();
    let keep_set: BTreeSet<&str> = keep.iter().map(String::as_str).collect();
    let present: BTreeSet<&str> = table.columns.iter().map(String::as_str).collect();

    let dropped: BTreeSet<String> = present.difference(&keep_set).map(|c| c.to_string()).collect();
    let expected: BTreeSet<String> = PROVENANCE_COLUMNS.iter().map(|c| c.to_string()).collect();
    if dropped != expected {
        return Err(ConfigurationError::ProvenanceColumnsMismatch { found: dropped, expected });
    }

    let missing: Vec<String> = keep.iter().filter(|c| !present.contains(c.as_str())).cloned().collect();
    if !missing.is_empty() {
        return Err(ConfigurationError::MissingKeepColumns(missing));
    }

    debug!("dropping provenance columns {:?} ({} kept for {})", dropped, keep.len(), columns.version_string());
    let rows = table.rows
                    .into_iter()
                    .map(|(key, mut row)| {
                        let projected = keep.iter().map(|c| (c.clone(), row.swap_remove(c).unwrap_or_default())).collect();
                        (key, projected)
                    })
                    .collect();
    Ok(KeyedTable { columns: keep.to_vec(), rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelFamily, Value};

    #[test]
    fn indexes_rows_and_rejects_duplicates() {
        let mut raw = RawTable::new(vec!["model".into(), "scenario".into(), "Category".into()]);
        raw.push_row(vec!["m".into(), "b".into(), "C2".into()]);
        raw.push_row(vec!["m".into(), "a".into(), "C1".into()]);
        let t = index_by_model_scenario(&raw).unwrap();
        let keys: Vec<String> = t.rows.keys().map(|k| k.scenario.clone()).collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(t.get(&MetaKey::new("m", "a"), "Category"), Some(&Value::from("C1")));

        raw.push_row(vec!["m".into(), "a".into(), "C3".into()]);
        assert!(matches!(index_by_model_scenario(&raw), Err(ConfigurationError::DuplicateKey(_))));
    }

    #[test]
    fn index_is_literal_and_values_are_typed() {
        let mut raw = RawTable::new(vec!["model".into(), "scenario".into(), "p50".into()]);
        raw.push_row(vec!["m".into(), Value::text_cell("1.50"), Value::text_cell("0.25")]);
        raw.push_row(vec!["m".into(), Value::text_cell("1.5"), Value::text_cell("0.5")]);
        let t = index_by_model_scenario(&raw).unwrap();
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.get(&MetaKey::new("m", "1.50"), "p50"), Some(&Value::Number(0.25)));
    }

    #[test]
    fn projection_keeps_listed_columns_in_order() {
        let cols = FamilyColumns::new(ModelFamily::CiceroScm, "");
        let mut names: Vec<String> = cols.keep_columns().iter().rev().cloned().collect();
        names.extend(PROVENANCE_COLUMNS.iter().map(|c| c.to_string()));
        let table = KeyedTable { columns: names, ..Default::default() };
        let projected = project_provenance(table, &cols).unwrap();
        assert_eq!(projected.columns, cols.keep_columns());
    }
}
