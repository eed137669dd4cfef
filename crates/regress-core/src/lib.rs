//! regress-core: normalización canónica y comparación con tolerancia.
//!
//! Este crate no hace IO. Recibe tablas ya leídas (`RawArtifact`) desde la
//! capa de adaptadores y produce:
//! - `CanonicalTable`: forma canónica ordenada y con esquema verificado.
//! - `ComparisonResult`: `Equal` o la lista estructurada de diferencias.
//! - Las reglas de captura (forma ancha ordenada) que la estrategia de
//!   actualización de baselines escribe a disco.

pub mod capture;
pub mod compare;
pub mod constants;
pub mod errors;
pub mod model;
pub mod normalize;

pub use compare::{Comparator, ComparisonResult, DiffEntry, DiffKind, RowKey, Tolerance};
pub use errors::ConfigurationError;
pub use model::{ArtifactIdentity, ArtifactKind, CanonicalTable, CaptureRule, FamilyColumns, KeyedTable, MetaKey, ModelFamily, OutputFormat, RawArtifact,
                RawTable, SeriesKey, TableShape, TimeSeriesTable, Value};
pub use normalize::Normalizer;
