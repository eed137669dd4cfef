//! Constantes del harness de regresión.
//!
//! Agrupa las tolerancias por defecto y los nombres de columnas fijos que
//! forman parte del contrato de esquema de los artifacts. Cambiar
//! `PROVENANCE_COLUMNS` equivale a aceptar un cambio de esquema de salida.

/// Tolerancia relativa por defecto al comparar contra baselines.
pub const DEFAULT_RTOL: f64 = 1e-4;
/// Tolerancia absoluta por defecto al comparar contra baselines.
pub const DEFAULT_ATOL: f64 = 1e-4;

/// Tolerancias del chequeo secundario contra el export de base de datos.
pub const CONSISTENCY_RTOL: f64 = 1e-5;
pub const CONSISTENCY_ATOL: f64 = 1e-6;

/// Columnas de procedencia (versiones de software) del meta del full-run.
/// Se descartan antes de comparar; el conjunto descartado debe coincidir
/// exactamente con esta lista.
pub const PROVENANCE_COLUMNS: [&str; 4] = ["climate-models", "infilling", "workflow", "harmonization"];

/// Columnas que identifican una fila de metadata.
pub const META_INDEX: [&str; 2] = ["model", "scenario"];

/// Columnas clave de una serie temporal IAMC (orden canónico).
pub const SERIES_INDEX: [&str; 5] = ["model", "scenario", "region", "variable", "unit"];

/// Nombre de hoja con los datos en un workbook IAMC.
pub const DATA_SHEET: &str = "data";
/// Nombre de hoja con la metadata en un workbook IAMC.
pub const META_SHEET: &str = "meta";

/// Prefijo que usan los serializadores tabulares para índices sin nombre.
pub const UNNAMED_INDEX_PREFIX: &str = "Unnamed: ";
