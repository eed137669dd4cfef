//! Modelos neutrales (ArtifactKind, Value, tablas crudas y canónicas, familias de modelo)

pub mod artifact;
pub mod family;
pub mod table;
pub mod value;

pub use artifact::{ArtifactIdentity, ArtifactKind, CaptureRule, OutputFormat, TableShape};
pub use family::{FamilyColumns, ModelFamily};
pub use table::{CanonicalTable, KeyedTable, MetaKey, RawArtifact, RawTable, SeriesKey, TimeSeriesTable};
pub use value::Value;
