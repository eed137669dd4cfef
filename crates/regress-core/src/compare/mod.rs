//! Comparador con tolerancia.
//!
//! Reglas:
//! - numérico: `|a - e| <= atol + rtol * |e|`; con infinitos sólo vale la
//!   igualdad exacta;
//! - ausente vs ausente es igual, ausente vs presente es diferencia
//!   numérica si la serie existe en ambos lados;
//! - etiquetas, booleanos y claves: igualdad exacta;
//! - columnas o claves presentes de un solo lado: diferencia estructural.
//!
//! La única restricción del espacio de claves está en
//! `compare_within_expected_keys`, pensada para salidas que por diseño son
//! un superconjunto del export esperado.

pub mod result;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{CONSISTENCY_ATOL, CONSISTENCY_RTOL, DEFAULT_ATOL, DEFAULT_RTOL};
use crate::model::{CanonicalTable, KeyedTable, SeriesKey, TimeSeriesTable, Value};

pub use result::{ComparisonResult, DiffEntry, DiffKind, RowKey};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance { rtol: DEFAULT_RTOL, atol: DEFAULT_ATOL };
    pub const CONSISTENCY: Tolerance = Tolerance { rtol: CONSISTENCY_RTOL, atol: CONSISTENCY_ATOL };

    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// `true` si `actual` está dentro de la tolerancia de `expected`.
    pub fn accepts(&self, actual: f64, expected: f64) -> bool {
        if !actual.is_finite() || !expected.is_finite() {
            return actual == expected;
        }
        (actual - expected).abs() <= self.atol + self.rtol * expected.abs()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::DEFAULT
    }
}

enum KeyScope<'a> {
    All,
    Only(&'a BTreeSet<&'a SeriesKey>),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    tolerance: Tolerance,
}

impl Comparator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn compare(&self, actual: &CanonicalTable, expected: &CanonicalTable) -> ComparisonResult {
        let entries = match (actual, expected) {
            (CanonicalTable::TimeSeries(a), CanonicalTable::TimeSeries(e)) => self.series_entries(a, e, KeyScope::All),
            (CanonicalTable::Keyed(a), CanonicalTable::Keyed(e)) => self.keyed_entries(a, e),
            (a, e) => vec![DiffEntry { key: RowKey::Table,
                                       column: "<shape>".into(),
                                       actual: Value::from(a.shape_name()),
                                       expected: Value::from(e.shape_name()),
                                       kind: DiffKind::Structural }],
        };
        ComparisonResult::from_entries(entries)
    }

    /// Compara restringiendo `actual` a las series presentes en `expected`.
    ///
    /// Una serie esperada que falta en `actual` sigue siendo diferencia.
    pub fn compare_within_expected_keys(&self, actual: &TimeSeriesTable, expected: &TimeSeriesTable) -> ComparisonResult {
        let keys: BTreeSet<&SeriesKey> = expected.series_keys().into_iter().collect();
        ComparisonResult::from_entries(self.series_entries(actual, expected, KeyScope::Only(&keys)))
    }

    fn series_entries(&self, actual: &TimeSeriesTable, expected: &TimeSeriesTable, scope: KeyScope<'_>) -> Vec<DiffEntry> {
        let mut entries = Vec::new();
        if actual.extra_columns != expected.extra_columns {
            entries.push(DiffEntry { key: RowKey::Table,
                                     column: "<extra columns>".into(),
                                     actual: Value::Text(actual.extra_columns.join(",")),
                                     expected: Value::Text(expected.extra_columns.join(",")),
                                     kind: DiffKind::Structural });
            return entries;
        }

        let in_scope = |key: &SeriesKey| match &scope {
            KeyScope::All => true,
            KeyScope::Only(keys) => keys.contains(key),
        };

        let mut pairs: BTreeMap<&(SeriesKey, i64), (Value, Value)> = BTreeMap::new();
        for (point, a) in actual.points.iter().filter(|(point, _)| in_scope(&point.0)) {
            let e = expected.points.get(point).map_or(Value::Missing, |e| Value::Number(*e));
            pairs.insert(point, (Value::Number(*a), e));
        }
        for (point, e) in &expected.points {
            if !actual.points.contains_key(point) {
                pairs.insert(point, (Value::Missing, Value::Number(*e)));
            }
        }
        let a_series: BTreeSet<&SeriesKey> = actual.series_keys().into_iter().collect();
        let e_series: BTreeSet<&SeriesKey> = expected.series_keys().into_iter().collect();
        for ((series, period), (a, e)) in pairs {
            let one_sided = !(a_series.contains(series) && e_series.contains(series));
            if let Some(kind) = self.value_diff(&a, &e).map(|k| if one_sided { DiffKind::Structural } else { k }) {
                entries.push(DiffEntry { key: RowKey::Series(series.clone()),
                                         column: period.to_string(),
                                         actual: a,
                                         expected: e,
                                         kind });
            }
        }

        match (&actual.meta, &expected.meta) {
            (Some(a), Some(e)) => entries.extend(self.keyed_entries(a, e)),
            (None, None) => {}
            (a, e) => entries.push(DiffEntry { key: RowKey::Table,
                                               column: "<meta>".into(),
                                               actual: Value::Bool(a.is_some()),
                                               expected: Value::Bool(e.is_some()),
                                               kind: DiffKind::Structural }),
        }
        entries
    }

    fn keyed_entries(&self, actual: &KeyedTable, expected: &KeyedTable) -> Vec<DiffEntry> {
        let mut entries = Vec::new();

        // el orden de columnas no importa, el conjunto sí
        let a_cols: BTreeSet<&String> = actual.columns.iter().collect();
        let e_cols: BTreeSet<&String> = expected.columns.iter().collect();
        for col in a_cols.symmetric_difference(&e_cols) {
            entries.push(DiffEntry { key: RowKey::Table,
                                     column: (*col).clone(),
                                     actual: Value::Bool(a_cols.contains(col)),
                                     expected: Value::Bool(e_cols.contains(col)),
                                     kind: DiffKind::Structural });
        }
        let shared: Vec<&String> = a_cols.intersection(&e_cols).copied().collect();

        let keys: BTreeSet<_> = actual.rows.keys().chain(expected.rows.keys()).collect();
        for key in keys {
            match (actual.rows.get(key), expected.rows.get(key)) {
                (Some(a_row), Some(e_row)) => {
                    for col in &shared {
                        let a = a_row.get(*col).cloned().unwrap_or_default();
                        let e = e_row.get(*col).cloned().unwrap_or_default();
                        if let Some(kind) = self.value_diff(&a, &e) {
                            entries.push(DiffEntry { key: RowKey::Meta(key.clone()),
                                                     column: (*col).clone(),
                                                     actual: a,
                                                     expected: e,
                                                     kind });
                        }
                    }
                }
                (a_row, _) => entries.push(DiffEntry { key: RowKey::Meta(key.clone()),
                                                       column: "<row>".into(),
                                                       actual: Value::Bool(a_row.is_some()),
                                                       expected: Value::Bool(a_row.is_none()),
                                                       kind: DiffKind::Structural }),
            }
        }
        entries
    }

    fn value_diff(&self, actual: &Value, expected: &Value) -> Option<DiffKind> {
        match (actual, expected) {
            (Value::Missing, Value::Missing) => None,
            (Value::Number(a), Value::Number(e)) => (!self.tolerance.accepts(*a, *e)).then_some(DiffKind::Numeric),
            (Value::Number(_), Value::Missing) | (Value::Missing, Value::Number(_)) => Some(DiffKind::Numeric),
            (a, e) => (a != e).then_some(DiffKind::Categorical),
        }
    }
}
