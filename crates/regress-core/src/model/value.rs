//! Valor de celda neutral.
//!
//! Todos los números se representan como `f64`: así una columna entera y otra
//! flotante con los mismos valores comparan iguales. `Missing` cubre celdas
//! vacías y NaN; nunca se interpreta como cero.
//!
//! Los codecs entregan el texto de las celdas sin interpretar
//! (`Value::text_cell`); el normalizador decide por rol de columna: las
//! claves se toman tal cual y los valores pasan por `Value::typed`.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Interpreta una celda de texto (CSV).
    pub fn parse_cell(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Value::Missing;
        }
        match s {
            "True" | "true" | "TRUE" => return Value::Bool(true),
            "False" | "false" | "FALSE" => return Value::Bool(false),
            _ => {}
        }
        match s.parse::<f64>() {
            Ok(n) => Value::number(n),
            Err(_) => Value::Text(s.to_string()),
        }
    }

    /// Celda de texto sin interpretar: vacía (o sólo espacios) es `Missing`,
    /// cualquier otra cosa se conserva literal.
    pub fn text_cell(raw: &str) -> Self {
        if raw.trim().is_empty() { Value::Missing } else { Value::Text(raw.to_string()) }
    }

    /// Interpreta el texto literal como número o booleano cuando corresponde.
    pub fn typed(&self) -> Value {
        match self {
            Value::Text(s) => Value::parse_cell(s),
            other => other.clone(),
        }
    }

    /// Número, con NaN normalizado a `Missing`.
    pub fn number(n: f64) -> Self {
        if n.is_nan() { Value::Missing } else { Value::Number(n) }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Representación como etiqueta (claves de índice, celdas CSV).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
