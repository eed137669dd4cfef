//! Resultado estructurado de una comparación.
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{MetaKey, SeriesKey, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Diferencia numérica fuera de tolerancia (o ausente vs presente).
    Numeric,
    /// Etiqueta / booleano distinto; la tolerancia no aplica.
    Categorical,
    /// Columna o clave presente sólo de un lado.
    Structural,
}

/// Fila a la que se refiere una entrada del diff.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum RowKey {
    Series(SeriesKey),
    Meta(MetaKey),
    /// Diferencia a nivel de tabla (columnas, forma).
    Table,
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Series(k) => write!(f, "{k}"),
            RowKey::Meta(k) => write!(f, "{k}"),
            RowKey::Table => f.write_str("<table>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub key: RowKey,
    /// Columna (o período, para series temporales).
    pub column: String,
    pub actual: Value,
    pub expected: Value,
    pub kind: DiffKind,
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Value| if v.is_missing() { "<absent>".to_string() } else { v.label() };
        write!(f, "{} [{}]: {} (actual) != {} (expected) [{:?}]", self.key, self.column, show(&self.actual), show(&self.expected), self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "entries", rename_all = "snake_case")]
pub enum ComparisonResult {
    Equal,
    Diff(Vec<DiffEntry>),
}

impl ComparisonResult {
    pub fn from_entries(entries: Vec<DiffEntry>) -> Self {
        if entries.is_empty() { ComparisonResult::Equal } else { ComparisonResult::Diff(entries) }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, ComparisonResult::Equal)
    }

    pub fn entries(&self) -> &[DiffEntry] {
        match self {
            ComparisonResult::Equal => &[],
            ComparisonResult::Diff(entries) => entries,
        }
    }

    /// Claves de fila con al menos una diferencia (sin repetir, ordenadas).
    pub fn mismatched_keys(&self) -> Vec<&RowKey> {
        let set: BTreeSet<&RowKey> = self.entries().iter().map(|e| &e.key).collect();
        set.into_iter().collect()
    }

    /// Nombres de variable afectados (series temporales), ordenados.
    pub fn affected_variables(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.entries()
                                      .iter()
                                      .filter_map(|e| match &e.key {
                                          RowKey::Series(k) => Some(k.variable.as_str()),
                                          _ => None,
                                      })
                                      .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(variable: &str, column: &str) -> DiffEntry {
        DiffEntry { key: RowKey::Series(SeriesKey::new("m", "s", "World", variable, "K")),
                    column: column.into(),
                    actual: Value::Number(1.0),
                    expected: Value::Number(2.0),
                    kind: DiffKind::Numeric }
    }

    #[test]
    fn affected_variables_are_distinct_and_sorted() {
        let res = ComparisonResult::from_entries(vec![entry("b", "2010"), entry("a", "2010"), entry("b", "2020")]);
        assert_eq!(res.affected_variables(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(res.mismatched_keys().len(), 2);
    }

    #[test]
    fn empty_entries_mean_equal() {
        assert!(ComparisonResult::from_entries(vec![]).is_equal());
    }

    #[test]
    fn diff_serializes_with_status_tag() {
        let res = ComparisonResult::from_entries(vec![entry("a", "2010")]);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], "diff");
        assert_eq!(json["entries"][0]["key"]["scope"], "series");
        assert_eq!(json["entries"][0]["kind"], "numeric");
    }
}
