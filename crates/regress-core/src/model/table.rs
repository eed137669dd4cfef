//! Tablas crudas (tal como las entrega el codec) y tablas canónicas.
use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::constants::UNNAMED_INDEX_PREFIX;

/// Tabla rectangular sin semántica: encabezados + filas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Agrega una fila ajustándola al ancho de la tabla (celdas faltantes = `Missing`).
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Missing);
        self.rows.push(row);
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Posición de una columna ignorando mayúsculas (`Model` == `model`).
    pub fn position_ignore_case(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(column))
    }

    /// Copia sin las columnas de índice reintroducidas por la serialización.
    pub fn without_serialization_index(&self) -> RawTable {
        let keep: Vec<usize> = (0..self.columns.len()).filter(|i| !is_serialization_index(&self.columns[*i])).collect();
        RawTable { columns: keep.iter().map(|i| self.columns[*i].clone()).collect(),
                   rows: self.rows.iter().map(|row| keep.iter().map(|i| row[*i].clone()).collect()).collect() }
    }
}

/// `Unnamed: 0` o encabezado vacío: índice sin nombre escrito por el serializador.
pub fn is_serialization_index(column: &str) -> bool {
    column.trim().is_empty() || column.starts_with(UNNAMED_INDEX_PREFIX)
}

/// Artifact crudo: tabla principal más la hoja `meta` cuando el archivo la trae.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArtifact {
    pub data: RawTable,
    pub meta: Option<RawTable>,
}

impl RawArtifact {
    pub fn new(data: RawTable) -> Self {
        Self { data, meta: None }
    }

    pub fn with_meta(data: RawTable, meta: RawTable) -> Self {
        Self { data, meta: Some(meta) }
    }
}

/// Clave completa de una serie (sin el período).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub model: String,
    pub scenario: String,
    pub region: String,
    pub variable: String,
    pub unit: String,
    /// Valores de columnas de etiqueta adicionales, en el orden de
    /// `TimeSeriesTable::extra_columns`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl SeriesKey {
    pub fn new(model: &str, scenario: &str, region: &str, variable: &str, unit: &str) -> Self {
        Self { model: model.into(),
               scenario: scenario.into(),
               region: region.into(),
               variable: variable.into(),
               unit: unit.into(),
               extra: Vec::new() }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}|{}", self.model, self.scenario, self.region, self.variable, self.unit)?;
        for e in &self.extra {
            write!(f, "|{e}")?;
        }
        Ok(())
    }
}

/// Serie temporal en forma larga: una entrada por (clave, período).
///
/// El `BTreeMap` mantiene el orden canónico (clave completa, luego período).
/// Los valores ausentes no se guardan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesTable {
    pub extra_columns: Vec<String>,
    pub points: BTreeMap<(SeriesKey, i64), f64>,
    /// Hoja `meta` del workbook (sólo artifacts `.xlsx`).
    pub meta: Option<KeyedTable>,
}

impl TimeSeriesTable {
    pub fn insert(&mut self, key: SeriesKey, period: i64, value: f64) -> Option<f64> {
        self.points.insert((key, period), value)
    }

    pub fn get(&self, key: &SeriesKey, period: i64) -> Option<f64> {
        self.points.get(&(key.clone(), period)).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Períodos presentes, ordenados.
    pub fn periods(&self) -> Vec<i64> {
        let mut out: Vec<i64> = self.points.keys().map(|(_, p)| *p).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Claves de serie distintas, ordenadas.
    pub fn series_keys(&self) -> Vec<&SeriesKey> {
        let mut out: Vec<&SeriesKey> = self.points.keys().map(|(k, _)| k).collect();
        out.dedup();
        out
    }
}

/// Índice de una fila de metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetaKey {
    pub model: String,
    pub scenario: String,
}

impl MetaKey {
    pub fn new(model: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self { model: model.into(), scenario: scenario.into() }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.model, self.scenario)
    }
}

/// Tabla plana indexada por (model, scenario). Las filas están ordenadas por
/// índice; las columnas conservan el orden de origen (o el de la lista de
/// columnas a mantener cuando hubo proyección).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedTable {
    pub columns: Vec<String>,
    pub rows: BTreeMap<MetaKey, IndexMap<String, Value>>,
}

impl KeyedTable {
    pub fn get(&self, key: &MetaKey, column: &str) -> Option<&Value> {
        self.rows.get(key).and_then(|row| row.get(column))
    }
}

/// Forma canónica de cualquier artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalTable {
    TimeSeries(TimeSeriesTable),
    Keyed(KeyedTable),
}

impl CanonicalTable {
    pub fn as_time_series(&self) -> Option<&TimeSeriesTable> {
        match self {
            CanonicalTable::TimeSeries(t) => Some(t),
            CanonicalTable::Keyed(_) => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&KeyedTable> {
        match self {
            CanonicalTable::Keyed(t) => Some(t),
            CanonicalTable::TimeSeries(_) => None,
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            CanonicalTable::TimeSeries(_) => "time series",
            CanonicalTable::Keyed(_) => "keyed table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_unnamed_index_columns() {
        let mut t = RawTable::new(vec!["Unnamed: 0".into(), "model".into(), "".into(), "x".into()]);
        t.push_row(vec![Value::Number(0.0), "m".into(), Value::Number(1.0), Value::Number(2.0)]);
        let out = t.without_serialization_index();
        assert_eq!(out.columns, vec!["model".to_string(), "x".to_string()]);
        assert_eq!(out.rows[0], vec![Value::from("m"), Value::Number(2.0)]);
    }

    #[test]
    fn push_row_pads_short_rows() {
        let mut t = RawTable::new(vec!["a".into(), "b".into()]);
        t.push_row(vec![Value::Number(1.0)]);
        assert_eq!(t.rows[0], vec![Value::Number(1.0), Value::Missing]);
    }
}
